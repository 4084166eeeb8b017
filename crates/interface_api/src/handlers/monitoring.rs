//! Monitoring feed handlers

use axum::{
    extract::{Query, State},
    Json,
};

use domain_monitoring::MonitoringRun;

use crate::dto::monitoring::*;
use crate::{error::ApiError, AppState};

/// All monitoring runs, oldest first
pub async fn all_runs(
    State(state): State<AppState>,
) -> Result<Json<MonitoringRunsResponse>, ApiError> {
    let runs = state.feed.load_all().await?;
    if runs.is_empty() {
        return Err(ApiError::NotFound("No monitoring runs available".to_string()));
    }
    Ok(Json(MonitoringRunsResponse::new(runs)))
}

/// The most recent monitoring run
pub async fn latest_run(State(state): State<AppState>) -> Result<Json<MonitoringRun>, ApiError> {
    Ok(Json(state.feed.latest().await?))
}

/// The most recent runs, oldest first
pub async fn run_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<MonitoringRunsResponse>, ApiError> {
    let limit = params.limit.unwrap_or(10).clamp(1, 100);
    let runs = state.feed.recent(limit).await?;
    if runs.is_empty() {
        return Err(ApiError::NotFound("No monitoring runs available".to_string()));
    }
    Ok(Json(MonitoringRunsResponse::new(runs)))
}

/// Metrics of the most recent run
pub async fn latest_metrics(
    State(state): State<AppState>,
) -> Result<Json<LatestMetricsResponse>, ApiError> {
    let run = state.feed.latest().await?;
    Ok(Json(run.into()))
}
