//! Analysis Routes
//!
//! Endpoints that run the symptom analytics over a posted log.
//!
//! - POST /api/v1/analyze - Full pattern report
//! - POST /api/v1/correlation - Correlate two symptom series
//! - POST /api/v1/patterns - Weekly/monthly cycles
//! - POST /api/v1/trends - Severity trend
//! - POST /api/v1/triggers - Context factor triggers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::analytics::{
    compute_correlation, correlation::aligned_pair_count, detect_cyclical_patterns, detect_trends,
    identify_triggers, PatternReport,
};
use crate::api::dto::{
    CorrelationRequest, CorrelationResponse, ObservationsRequest, PatternsResponse,
    TrendsResponse, TriggersResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::import::validate_records;

/// POST /api/v1/analyze
///
/// Run every analysis and return the combined report.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ObservationsRequest>,
) -> ApiResult<Json<PatternReport>> {
    let observations = req.into_observations()?;
    Ok(Json(state.analytics.analyze(&observations)))
}

/// POST /api/v1/correlation
pub async fn correlation(Json(req): Json<CorrelationRequest>) -> ApiResult<Json<CorrelationResponse>> {
    let series_a = validate_records(req.series_a)
        .map_err(|e| ApiError::Validation(format!("series_a: {}", e)))?;
    let series_b = validate_records(req.series_b)
        .map_err(|e| ApiError::Validation(format!("series_b: {}", e)))?;

    Ok(Json(CorrelationResponse {
        coefficient: compute_correlation(&series_a, &series_b),
        pairs_considered: aligned_pair_count(&series_a, &series_b),
    }))
}

/// POST /api/v1/patterns
pub async fn patterns(Json(req): Json<ObservationsRequest>) -> ApiResult<Json<PatternsResponse>> {
    let observations = req.into_observations()?;
    Ok(Json(PatternsResponse {
        patterns: detect_cyclical_patterns(&observations),
    }))
}

/// POST /api/v1/trends
pub async fn trends(Json(req): Json<ObservationsRequest>) -> ApiResult<Json<TrendsResponse>> {
    let observations = req.into_observations()?;
    Ok(Json(TrendsResponse {
        trends: detect_trends(&observations),
    }))
}

/// POST /api/v1/triggers
pub async fn triggers(Json(req): Json<ObservationsRequest>) -> ApiResult<Json<TriggersResponse>> {
    let observations = req.into_observations()?;
    Ok(Json(TriggersResponse {
        triggers: identify_triggers(&observations),
    }))
}
