//! Fiber Friends API Server
//!
//! Run with: cargo run --bin fiberfriends-api
//!
//! # Configuration
//!
//! Read from the first config file found (see [`Config::load_default`]),
//! then overridden by environment variables:
//! - `FIBERFRIENDS_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `FIBERFRIENDS_API_PORT`: Port to listen on (default: 8086)
//! - `FIBERFRIENDS_PATTERN_CONFIDENCE`: Insight threshold for cycles (default: 70)
//! - `FIBERFRIENDS_TREND_CONFIDENCE`: Insight threshold for trends (default: 60)
//! - `FIBERFRIENDS_LOG_LEVEL` / `FIBERFRIENDS_LOG_FORMAT`
//! - `RUST_LOG`: Overrides the configured log filter

use fiberfriends::analytics::SymptomAnalytics;
use fiberfriends::api::{serve, AppState};
use fiberfriends::config::Config;
use fiberfriends::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    init_logging(&config.logging)?;

    tracing::info!("Starting Fiber Friends API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        pattern_confidence = config.insights.pattern_confidence,
        trend_confidence = config.insights.trend_confidence,
        max_triggers = config.insights.max_triggers,
        correlation_strength = config.insights.correlation_strength,
        "Insight thresholds"
    );

    let analytics = SymptomAnalytics::new(config.insights.clone());
    let state = AppState::new(analytics, config.api.clone());

    serve(state, &config.api).await?;

    tracing::info!("Fiber Friends API server stopped");
    Ok(())
}
