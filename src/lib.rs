pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::geocode::GoogleGeocoder;
pub use adapters::output::CsvSink;
pub use config::CliConfig;
pub use core::engine::{render_latlngs, ScrapeEngine};
pub use core::pipeline::ScrapePipeline;
pub use utils::error::{Result, ScrapeError};
