pub mod dedupe;
pub mod engine;
pub mod pipeline;
pub mod sanitize;
pub mod table;
pub mod tokenizer;

pub use crate::domain::model::{GeoPoint, OfficeRecord};
pub use crate::domain::ports::{ConfigProvider, Geocoder, Pipeline, RecordSink};
pub use crate::utils::error::Result;
