use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Geocoding failed for {address}: {reason}")]
    Geocode { address: String, reason: String },
}

impl ScrapeError {
    /// Configuration problems are caught before any network activity and
    /// map to their own exit code.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::MissingConfig { .. } | Self::InvalidConfigValue { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
