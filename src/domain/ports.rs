use crate::domain::model::{GeoPoint, OfficeRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn localities(&self) -> &[String];
    fn search_by_city(&self) -> bool;
    fn csv_output(&self) -> bool;
    fn api_key(&self) -> Option<&str>;
}

/// Receives each unique record in admission order.
pub trait RecordSink: Send {
    fn accept(&mut self, record: &OfficeRecord) -> Result<()>;
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<GeoPoint>;
}

#[async_trait]
pub trait Pipeline: Send {
    async fn run(&mut self) -> Result<Vec<OfficeRecord>>;
}
