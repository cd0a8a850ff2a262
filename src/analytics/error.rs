//! Observation validation errors
//!
//! The analytics themselves never fail. These errors are raised only when
//! raw records are turned into [`SymptomObservation`](super::SymptomObservation)
//! values at the input boundary.

use thiserror::Error;

use super::types::{SEVERITY_MAX, SEVERITY_MIN};

/// Errors that can occur while validating a raw observation record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObservationError {
    /// Symptom name was empty or whitespace
    #[error("Symptom name must not be empty")]
    EmptySymptomName,

    /// Severity outside the fixed rating scale
    #[error("Severity {0} is outside the {min}-{max} scale", min = SEVERITY_MIN, max = SEVERITY_MAX)]
    SeverityOutOfRange(f64),

    /// Severity was not a whole number
    #[error("Severity {0} must be a whole number")]
    FractionalSeverity(f64),
}

/// Result type alias for observation validation
pub type ObservationResult<T> = Result<T, ObservationError>;
