//! # Fiber Friends
//!
//! Symptom pattern analytics for people tracking chronic digestive and
//! fatigue symptoms. Turns a daily log of severity ratings into findings a
//! person can act on.
//!
//! ## Features
//!
//! - **Correlation**: which symptoms flare up together
//! - **Cycles**: weekly and monthly recurrence
//! - **Trends**: whether things are getting better or worse
//! - **Triggers**: context factors (foods, stress, sleep) tied to worse days
//! - **Insights**: plain-language summaries of the above
//!
//! ## Modules
//!
//! - [`analytics`]: Pure pattern-recognition functions
//! - [`import`]: CSV/JSON log loading and validation
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: `tracing` subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fiberfriends::{load_observations, SymptomAnalytics};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let observations = load_observations(Path::new("symptoms.csv"))?;
//!     let report = SymptomAnalytics::default().analyze(&observations);
//!
//!     for insight in &report.insights {
//!         println!("{}", insight);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod config;
pub mod import;
pub mod logging;

// Re-export top-level types for convenience
pub use analytics::{
    compute_correlation, detect_cyclical_patterns, detect_trends, generate_pattern_insights,
    identify_triggers, CorrelationResult, CyclicalPattern, InsightThresholds, ObservationError,
    PatternReport, SymptomAnalytics, SymptomCorrelation, SymptomObservation, TrendDirection,
    TrendResult, TriggerFinding,
};

pub use import::{load_observations, ImportError, ImportResult};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig};
