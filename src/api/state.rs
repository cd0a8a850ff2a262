//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::analytics::{InsightThresholds, SymptomAnalytics};
use crate::config::ApiConfig;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Analytics facade carrying the insight thresholds
    pub analytics: SymptomAnalytics,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(analytics: SymptomAnalytics, config: ApiConfig) -> Self {
        Self {
            analytics,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Create AppState with explicit insight thresholds
    pub fn with_thresholds(thresholds: InsightThresholds, config: ApiConfig) -> Self {
        Self::new(SymptomAnalytics::new(thresholds), config)
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SymptomAnalytics::default(), ApiConfig::default())
    }
}
