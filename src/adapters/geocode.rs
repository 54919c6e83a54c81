use crate::domain::model::GeoPoint;
use crate::domain::ports::Geocoder;
use crate::utils::error::{Result, ScrapeError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Google Geocoding API endpoint.
pub const GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One request per address, no retry; any failure is fatal to the run.
pub struct GoogleGeocoder {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GoogleGeocoder {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: GEOCODE_ENDPOINT.to_string(),
        })
    }

    /// Points the geocoder at a different endpoint (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn query_url(&self, address: &str) -> Result<Url> {
        let url = Url::parse_with_params(
            &self.base_url,
            [("address", address), ("key", self.api_key.as_str())],
        )?;
        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: GeoPoint,
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    /// Only the first candidate's coordinates are kept.
    async fn geocode(&self, address: &str) -> Result<GeoPoint> {
        let url = self.query_url(address)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| geocode_error(address, format!("transport: {}", e)))?;
        if !response.status().is_success() {
            return Err(geocode_error(
                address,
                format!("HTTP status {}", response.status()),
            ));
        }
        let payload: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| geocode_error(address, format!("bad payload: {}", e)))?;
        if payload.status != "OK" {
            return Err(geocode_error(
                address,
                format!("API status {}", payload.status),
            ));
        }
        payload
            .results
            .into_iter()
            .next()
            .map(|r| r.geometry.location)
            .ok_or_else(|| geocode_error(address, "no results".to_string()))
    }
}

fn geocode_error(address: &str, reason: String) -> ScrapeError {
    ScrapeError::Geocode {
        address: address.to_string(),
        reason,
    }
}
