//! Structured logging with tracing
//!
//! A small init helper for embedders and tests. The `WIREBOX_LOG`
//! environment variable overrides the level passed in, using the usual
//! `EnvFilter` directive syntax.

use wirebox_domain::{Error, Result};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Initialize logging at the given default level
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_env("WIREBOX_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    let stdout = fmt::layer().with_target(true);

    Registry::default()
        .with(filter)
        .with(stdout)
        .try_init()
        .map_err(|e| Error::configuration(format!("failed to initialize logging: {e}")))
}
