//! Symptom Analytics
//!
//! Pure, synchronous analyses over a log of symptom observations:
//!
//! - **correlation**: Pearson correlation between time-aligned symptom series
//! - **cycles**: weekly and monthly recurrence via bucketed variance
//! - **trends**: moving-average smoothing plus a least-squares slope
//! - **triggers**: context factors whose presence shifts severity
//! - **insights**: rule-based sentences summarizing the findings
//! - **report**: a facade that runs everything over one log
//!
//! None of these functions perform I/O or fail. Too little data yields an
//! empty result or a coefficient of 0; validation of raw input happens
//! once, when a [`SymptomObservation`] is constructed.
//!
//! # Example
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use fiberfriends::analytics::{detect_trends, SymptomObservation, TrendDirection};
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
//! let log: Vec<SymptomObservation> = [9, 8, 7, 6, 5, 4, 3]
//!     .iter()
//!     .enumerate()
//!     .map(|(day, &severity)| {
//!         SymptomObservation::new("bloating", severity, start + Duration::days(day as i64))
//!             .unwrap()
//!     })
//!     .collect();
//!
//! let trends = detect_trends(&log);
//! assert_eq!(trends[0].direction, TrendDirection::Improving);
//! ```

pub mod correlation;
pub mod cycles;
pub mod error;
pub mod insights;
pub mod report;
pub mod stats;
pub mod trends;
pub mod triggers;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use correlation::{compute_correlation, correlate_symptoms, group_by_symptom};
pub use cycles::detect_cyclical_patterns;
pub use error::{ObservationError, ObservationResult};
pub use insights::{generate_pattern_insights, generate_pattern_insights_with, InsightThresholds};
pub use report::{filter_symptom, PatternReport, SymptomAnalytics, SymptomSummary};
pub use trends::detect_trends;
pub use triggers::identify_triggers;
pub use types::{
    CorrelationDirection, CorrelationResult, CorrelationStrength, CyclicalPattern,
    ObservationRecord, SymptomCorrelation, SymptomObservation, TrendDirection, TrendResult,
    TriggerFinding, SEVERITY_MAX, SEVERITY_MIN,
};
