//! Logging Setup
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` wins over the
//! configured level when it is set.

use crate::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter from `RUST_LOG`, falling back to the configured level
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "fiberfriends={level},tower_http={level}",
            level = config.level
        ))
    })
}

/// Initialize the global subscriber
///
/// Returns an error if a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    match config.format.as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    }
}

/// Initialize logging for command-line use
///
/// Logs go to stderr so that stdout stays clean for command output.
pub fn init_cli_logging(config: &LoggingConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    match config.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    }
}
