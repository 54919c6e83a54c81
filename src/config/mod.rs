use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{
    validate_non_empty_string, validate_required_field, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Search endpoint of the vendor listings site.
pub const SEARCH_ENDPOINT: &str = "http://www.sandman.com/cosearch.asp";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cosearch")]
#[command(about = "Find central offices by ZIP code or city, as CSV or geocoded JSON")]
pub struct CliConfig {
    /// Localities to search, comma separated (ZIP codes, or city names with --city)
    #[arg(short = 'Z', long = "zips", value_delimiter = ',')]
    pub localities: Vec<String>,

    /// Interpret the localities as city names instead of ZIP codes
    #[arg(long)]
    pub city: bool,

    /// API key for the geocoding service (required unless --csv)
    #[arg(short = 'a', long)]
    pub apikey: Option<String>,

    /// Emit CSV for map import instead of geocoded JSON
    #[arg(short = 'c', long)]
    pub csv: bool,

    /// Listings endpoint
    #[arg(long, default_value = SEARCH_ENDPOINT)]
    pub endpoint: String,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn localities(&self) -> &[String] {
        &self.localities
    }

    fn search_by_city(&self) -> bool {
        self.city
    }

    fn csv_output(&self) -> bool {
        self.csv
    }

    fn api_key(&self) -> Option<&str> {
        self.apikey.as_deref()
    }
}

impl Validate for CliConfig {
    /// Runs before any network activity; a failure here is fatal.
    fn validate(&self) -> Result<()> {
        if self.localities.is_empty() {
            return Err(ScrapeError::MissingConfig {
                field: "zips".to_string(),
            });
        }
        for locality in &self.localities {
            validate_non_empty_string("zips", locality)?;
        }
        validate_url("endpoint", &self.endpoint)?;
        if !self.csv {
            let key = validate_required_field("apikey", &self.apikey)?;
            validate_non_empty_string("apikey", key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            localities: vec!["80202".to_string()],
            city: false,
            apikey: None,
            csv: true,
            endpoint: SEARCH_ENDPOINT.to_string(),
            verbose: false,
        }
    }

    #[test]
    fn csv_mode_needs_no_api_key() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn json_mode_requires_api_key() {
        let mut config = base_config();
        config.csv = false;
        assert!(matches!(
            config.validate(),
            Err(ScrapeError::MissingConfig { .. })
        ));

        config.apikey = Some("secret".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn localities_are_required_and_non_blank() {
        let mut config = base_config();
        config.localities.clear();
        assert!(config.validate().is_err());

        config.localities = vec!["80202".to_string(), " ".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn endpoint_must_be_http() {
        let mut config = base_config();
        config.endpoint = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }
}
