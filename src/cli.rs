//! Command-line interface parsing for the crypto feed CLI
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! a validated [`RunConfig`]. It also renders loaded records for the terminal.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::data::http::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use crate::data::FeedRecord;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// More than one of the mutually exclusive mode flags was given
    #[error("Conflicting modes: only one of --offline, --refresh, --validate-cache may be used")]
    ConflictingModes,

    /// The timeout must be at least one second
    #[error("Invalid timeout: {0}. The timeout must be at least 1 second")]
    InvalidTimeout(u64),

    /// No cache directory was given and none could be determined
    #[error("Could not determine a cache directory, pass --cache-dir")]
    NoCacheDir,
}

/// Crypto Feed CLI - Top cryptocurrency prices with a local cache
#[derive(Parser, Debug)]
#[command(name = "cryptofeed")]
#[command(about = "Cryptocurrency prices, cached locally for 24 hours")]
#[command(version)]
pub struct Cli {
    /// Only read the local cache, never contact the remote feed
    #[arg(long)]
    pub offline: bool,

    /// Skip the cache, fetch from the remote feed and re-save the cache
    #[arg(long)]
    pub refresh: bool,

    /// Delete the cache if it is stale or unreadable, then exit
    #[arg(long)]
    pub validate_cache: bool,

    /// Directory holding the cache file (defaults to the platform cache dir)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Feed endpoint URL
    #[arg(long, value_name = "URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Print records as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

/// What the run should do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Serve fresh cache, otherwise fetch and save
    #[default]
    Auto,
    /// Cache only
    Offline,
    /// Remote only, then save
    Refresh,
    /// Evict stale or unreadable cache
    ValidateCache,
}

/// Output format for loaded records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: Mode,
    /// Explicit cache directory; `None` means the platform default
    pub cache_dir: Option<PathBuf>,
    pub endpoint: String,
    pub timeout: Duration,
    pub output: OutputFormat,
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Auto,
            cache_dir: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            output: OutputFormat::Table,
            verbose: false,
        }
    }
}

impl RunConfig {
    /// Creates a RunConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(RunConfig)` with appropriate settings
    /// * `Err(CliError)` if the flags conflict or a value is out of range
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mode = match (cli.offline, cli.refresh, cli.validate_cache) {
            (false, false, false) => Mode::Auto,
            (true, false, false) => Mode::Offline,
            (false, true, false) => Mode::Refresh,
            (false, false, true) => Mode::ValidateCache,
            _ => return Err(CliError::ConflictingModes),
        };

        if cli.timeout_secs == 0 {
            return Err(CliError::InvalidTimeout(cli.timeout_secs));
        }

        Ok(RunConfig {
            mode,
            cache_dir: cli.cache_dir.clone(),
            endpoint: cli.endpoint.clone(),
            timeout: Duration::from_secs(cli.timeout_secs),
            output: if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Table
            },
            verbose: cli.verbose,
        })
    }
}

/// Formats records as aligned lines: symbol, name, price, daily change
pub fn format_table(feed: &[FeedRecord]) -> String {
    if feed.is_empty() {
        return "No data available".to_string();
    }

    let name_width = feed
        .iter()
        .map(|r| r.full_name.chars().count())
        .max()
        .unwrap_or(0);

    feed.iter()
        .map(|r| {
            format!(
                "{:<8} {:<width$} {:>16.4} {:>+8.2}%",
                r.name,
                r.full_name,
                r.price_usd,
                r.change_pct_day_usd,
                width = name_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, full_name: &str, price: f64, change: f32) -> FeedRecord {
        FeedRecord {
            id: name.to_lowercase(),
            name: name.to_string(),
            full_name: full_name.to_string(),
            image_url: String::new(),
            price_usd: price,
            change_pct_day_usd: change,
        }
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["cryptofeed"]);
        assert!(!cli.offline);
        assert!(!cli.refresh);
        assert!(!cli.validate_cache);
        assert!(cli.cache_dir.is_none());
        assert_eq!(cli.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cli.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_run_config_default() {
        let config = RunConfig::default();
        assert_eq!(config.mode, Mode::Auto);
        assert_eq!(config.output, OutputFormat::Table);
        assert!(config.cache_dir.is_none());
    }

    #[test]
    fn test_run_config_from_cli_no_flags() {
        let cli = Cli::parse_from(["cryptofeed"]);
        let config = RunConfig::from_cli(&cli).unwrap();
        assert_eq!(config.mode, Mode::Auto);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_run_config_from_cli_modes() {
        let offline = RunConfig::from_cli(&Cli::parse_from(["cryptofeed", "--offline"])).unwrap();
        assert_eq!(offline.mode, Mode::Offline);

        let refresh = RunConfig::from_cli(&Cli::parse_from(["cryptofeed", "--refresh"])).unwrap();
        assert_eq!(refresh.mode, Mode::Refresh);

        let validate =
            RunConfig::from_cli(&Cli::parse_from(["cryptofeed", "--validate-cache"])).unwrap();
        assert_eq!(validate.mode, Mode::ValidateCache);
    }

    #[test]
    fn test_run_config_from_cli_conflicting_modes() {
        let cli = Cli::parse_from(["cryptofeed", "--offline", "--refresh"]);
        let result = RunConfig::from_cli(&cli);
        assert!(matches!(result, Err(CliError::ConflictingModes)));
    }

    #[test]
    fn test_run_config_from_cli_zero_timeout() {
        let cli = Cli::parse_from(["cryptofeed", "--timeout-secs", "0"]);
        let err = RunConfig::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("Invalid timeout"));
    }

    #[test]
    fn test_run_config_from_cli_overrides() {
        let cli = Cli::parse_from([
            "cryptofeed",
            "--cache-dir",
            "/tmp/feed-cache",
            "--endpoint",
            "http://localhost:8080/feed",
            "--timeout-secs",
            "3",
            "--json",
            "-v",
        ]);
        let config = RunConfig::from_cli(&cli).unwrap();
        assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/feed-cache")));
        assert_eq!(config.endpoint, "http://localhost:8080/feed");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.output, OutputFormat::Json);
        assert!(config.verbose);
    }

    #[test]
    fn test_format_table_empty() {
        assert_eq!(format_table(&[]), "No data available");
    }

    #[test]
    fn test_format_table_one_line_per_record() {
        let feed = vec![
            record("BTC", "Bitcoin", 67_000.5, 1.25),
            record("ETH", "Ethereum", 3_100.0, -0.5),
        ];

        let table = format_table(&feed);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("BTC"));
        assert!(lines[0].contains("Bitcoin"));
        assert!(lines[0].contains("67000.5000"));
        assert!(lines[0].contains("+1.25%"));
        assert!(lines[1].contains("Ethereum"));
        assert!(lines[1].contains("-0.50%"));
    }
}
