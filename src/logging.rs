// src/logging.rs
// Logging setup: tracing events to stderr, stdout stays free for the
// banner and the summary (or the --json output).

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,http_mirror=info";

/// Installs the global subscriber. RUST_LOG overrides the default filter.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
