//! Insight Routes
//!
//! Turns previously computed findings into plain-language sentences.
//!
//! - POST /api/v1/insights - Generate insight sentences

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{InsightsRequest, InsightsResponse};
use crate::api::state::AppState;

/// POST /api/v1/insights
///
/// Uses the server's configured thresholds.
pub async fn generate_insights(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InsightsRequest>,
) -> Json<InsightsResponse> {
    let insights = state
        .analytics
        .insights(&req.patterns, &req.trends, &req.triggers, &req.correlations);

    Json(InsightsResponse { insights })
}
