//! Log output setup

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber, writing to stderr
///
/// `RUST_LOG` wins when set; otherwise the level is `debug` for `verbose`
/// runs and `warn` for the rest.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
