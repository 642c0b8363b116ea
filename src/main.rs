//! Crypto Feed CLI - Print top cryptocurrency prices
//!
//! Serves prices from the local cache while it is fresh and falls back to the
//! remote feed, re-saving the cache after every successful fetch.

use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use tracing::info;

use cryptofeed::cache::{FileFeedStore, LocalFeedLoader};
use cryptofeed::cli::{format_table, Cli, CliError, Mode, OutputFormat, RunConfig};
use cryptofeed::data::{FeedRecord, RemoteFeedLoader, ReqwestHttpClient};
use cryptofeed::logging::init_logging;
use cryptofeed::sync::FeedRepository;

/// Wires the adapters into a repository for the given configuration
fn build_repository(config: &RunConfig) -> Result<FeedRepository, CliError> {
    let store = match &config.cache_dir {
        Some(dir) => FileFeedStore::with_dir(dir.clone()),
        None => FileFeedStore::new().ok_or(CliError::NoCacheDir)?,
    };
    info!(cache_dir = %store.cache_dir().display(), "using cache directory");

    let client = ReqwestHttpClient::new()
        .with_endpoint(config.endpoint.clone())
        .with_timeout(config.timeout);

    Ok(FeedRepository::new(
        RemoteFeedLoader::new(Arc::new(client)),
        LocalFeedLoader::new(Arc::new(store), Utc::now()),
    ))
}

fn print_feed(feed: &[FeedRecord], output: OutputFormat) -> Result<(), serde_json::Error> {
    match output {
        OutputFormat::Table => println!("{}", format_table(feed)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(feed)?),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = RunConfig::from_cli(&cli)?;

    init_logging(config.verbose);

    let repository = build_repository(&config)?;

    let feed = match config.mode {
        Mode::Auto => repository.load().await?,
        Mode::Offline => repository.load_offline().await?,
        Mode::Refresh => repository.refresh().await?,
        Mode::ValidateCache => {
            repository.validate_cache().await?;
            info!("cache validated");
            return Ok(());
        }
    };

    info!(count = feed.len(), "feed loaded");
    print_feed(&feed, config.output)?;

    Ok(())
}
