//! Structured logging for the command line tools.
//!
//! Events go to stderr so the report on stdout stays clean. The filter is
//! taken from `RUST_LOG` and defaults to `info`.

use tracing_subscriber::EnvFilter;

pub fn init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
}
