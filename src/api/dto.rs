//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::analytics::{
    CyclicalPattern, InsightThresholds, ObservationRecord, SymptomCorrelation, SymptomObservation,
    TrendResult, TriggerFinding,
};
use crate::api::error::ApiResult;
use crate::import::validate_records;

// ============================================
// OBSERVATION DTOs
// ============================================

/// Request body carrying a raw observation log
#[derive(Debug, Deserialize)]
pub struct ObservationsRequest {
    /// Unvalidated observation records
    pub observations: Vec<ObservationRecord>,
}

impl ObservationsRequest {
    /// Validate every record, failing on the first bad index
    pub fn into_observations(self) -> ApiResult<Vec<SymptomObservation>> {
        Ok(validate_records(self.observations)?)
    }
}

// ============================================
// CORRELATION DTOs
// ============================================

/// Two symptom series to correlate
#[derive(Debug, Deserialize)]
pub struct CorrelationRequest {
    pub series_a: Vec<ObservationRecord>,
    pub series_b: Vec<ObservationRecord>,
}

/// Correlation response
#[derive(Debug, Serialize, Deserialize)]
pub struct CorrelationResponse {
    /// Pearson coefficient (-1 to 1)
    pub coefficient: f64,
    /// Number of time-aligned pairs the coefficient is based on
    pub pairs_considered: usize,
}

// ============================================
// ANALYSIS DTOs
// ============================================

/// Cyclical pattern response
#[derive(Debug, Serialize, Deserialize)]
pub struct PatternsResponse {
    pub patterns: Vec<CyclicalPattern>,
}

/// Trend response
#[derive(Debug, Serialize, Deserialize)]
pub struct TrendsResponse {
    pub trends: Vec<TrendResult>,
}

/// Trigger response
#[derive(Debug, Serialize, Deserialize)]
pub struct TriggersResponse {
    pub triggers: Vec<TriggerFinding>,
}

// ============================================
// INSIGHT DTOs
// ============================================

/// Findings to turn into insight sentences; every list is optional
#[derive(Debug, Default, Deserialize)]
pub struct InsightsRequest {
    #[serde(default)]
    pub patterns: Vec<CyclicalPattern>,
    #[serde(default)]
    pub trends: Vec<TrendResult>,
    #[serde(default)]
    pub triggers: Vec<TriggerFinding>,
    #[serde(default)]
    pub correlations: Vec<SymptomCorrelation>,
}

/// Insight response
#[derive(Debug, Serialize, Deserialize)]
pub struct InsightsResponse {
    pub insights: Vec<String>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy
    pub status: String,
    /// Insight thresholds the server is running with
    pub thresholds: InsightThresholds,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
