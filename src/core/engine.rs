use crate::core::{GeoPoint, Geocoder, OfficeRecord, Pipeline};
use crate::utils::error::Result;

/// Drives the stages of one run: scrape, then (in JSON mode) enrichment.
pub struct ScrapeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScrapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs the scrape stage and returns the unique records in admission
    /// order.
    pub async fn run(&mut self) -> Result<Vec<OfficeRecord>> {
        tracing::info!("starting scrape");
        let records = self.pipeline.run().await?;
        tracing::info!("scraped {} unique location(s)", records.len());
        Ok(records)
    }

    /// Geocodes each record's location, one request at a time, in input
    /// order. The first failure aborts the remaining work.
    pub async fn enrich<G: Geocoder>(
        &self,
        geocoder: &G,
        records: &[OfficeRecord],
    ) -> Result<Vec<GeoPoint>> {
        let mut points = Vec::with_capacity(records.len());
        for record in records {
            let point = geocoder.geocode(record.location_key()).await?;
            tracing::debug!("{} -> {}", record.location_key(), point);
            points.push(point);
        }
        Ok(points)
    }
}

/// JSON array of `"lat,lng"` strings, one per point, input order.
pub fn render_latlngs(points: &[GeoPoint]) -> Result<String> {
    let latlngs: Vec<String> = points.iter().map(GeoPoint::to_string).collect();
    Ok(serde_json::to_string(&latlngs)?)
}
