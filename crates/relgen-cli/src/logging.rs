use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Initialize process logging: compact fmt output on stderr, filtered by
/// `RELGEN_LOG` (default `info`).
pub fn init_logging() -> Result<(), String> {
    let filter = EnvFilter::try_from_env("RELGEN_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|err| err.to_string())
}
