//! Tracing Setup
//!
//! Installs the global `tracing` subscriber from [`LoggingConfig`].
//!
//! # Configuration
//!
//! - `RUST_LOG`: overrides `observability.logging.level` when set
//! - `observability.logging.format`: `json` (default), `pretty` or `compact`

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::config::LoggingConfig;

/// Install the global subscriber.
///
/// Fails when a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = env_filter(config);
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match config.format.as_str() {
        "pretty" => builder.pretty().finish().try_init(),
        "compact" => builder.compact().finish().try_init(),
        _ => builder.json().with_current_span(false).finish().try_init(),
    }
}

/// `RUST_LOG` when present and valid, otherwise the configured level.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}
