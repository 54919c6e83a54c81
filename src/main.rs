use clap::Parser;
use cosearch::domain::ports::ConfigProvider;
use cosearch::utils::{logger, validation::Validate};
use cosearch::{
    render_latlngs, CliConfig, CsvSink, GoogleGeocoder, ScrapeEngine, ScrapeError, ScrapePipeline,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting cosearch");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(2);
    }

    if let Err(e) = run(config).await {
        tracing::error!("Run failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(if e.is_config_error() { 2 } else { 1 });
    }
}

async fn run(config: CliConfig) -> cosearch::Result<()> {
    let csv = config.csv_output();
    let apikey = config.api_key().map(str::to_string);

    let pipeline = ScrapePipeline::new(CsvSink::stdout(), config)?;
    let mut engine = ScrapeEngine::new(pipeline);

    let records = engine.run().await?;
    if csv {
        return Ok(());
    }

    // validated upfront, but the type still carries the Option
    let key = apikey.ok_or_else(|| ScrapeError::MissingConfig {
        field: "apikey".to_string(),
    })?;
    let geocoder = GoogleGeocoder::new(key)?;
    let points = engine.enrich(&geocoder, &records).await?;
    println!("{}", render_latlngs(&points)?);
    Ok(())
}
