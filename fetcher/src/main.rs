use anyhow::{Context, Result};
use cgesp_core::{Scraper, ScraperConfig};
use reqwest::Client as HTTPClient;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, instrument};

mod logging;

fn log_dir() -> PathBuf {
    std::env::var_os("CGESP_LOG_DIR")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

fn request_timeout() -> Option<Duration> {
    parse_timeout(std::env::var("CGESP_REQUEST_TIMEOUT_SECS").ok().as_deref())
}

fn parse_timeout(value: Option<&str>) -> Option<Duration> {
    value
        .and_then(|value| value.trim().parse().ok())
        .map(Duration::from_secs)
}

#[instrument(skip(http_client))]
async fn run(http_client: HTTPClient, config: ScraperConfig) -> Result<String> {
    let mut scraper = Scraper::initialize(http_client, config)
        .await
        .context("fetching station directory")?;
    scraper.scrape_all().await.context("scraping regions")?;
    scraper.to_json().context("serializing regions")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::setup_logging(&log_dir()).context("setting up logging")?;
    info!(target: logging::TARGET, event = "fetcher.started", "Starting scraper");

    let mut builder = HTTPClient::builder();
    if let Some(timeout) = request_timeout() {
        builder = builder.timeout(timeout);
    }
    let http_client = builder.build()?;

    let json = run(http_client, ScraperConfig::from_env()).await?;
    info!(target: logging::TARGET, event = "fetcher.finished", "Finished scraping");
    println!("{json}");
    Ok(())
}
