//! Feedback handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::UserId;
use infra_db::{FeedbackRecord, FeedbackRepository, NewFeedback};

use crate::dto::feedback::*;
use crate::{error::ApiError, AppState};

/// Submits governance feedback
pub async fn create_feedback(
    State(state): State<AppState>,
    Json(request): Json<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackRecord>), ApiError> {
    request.validate()?;

    let repo = FeedbackRepository::new(state.pool.clone());
    let record = repo
        .create(NewFeedback {
            user_id: UserId::new(request.user_id),
            risk_type: request.risk_type,
            severity: request.severity,
            title: request.title,
            description: request.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Lists feedback, newest first
pub async fn list_feedback(
    State(state): State<AppState>,
    Query(params): Query<ListFeedbackParams>,
) -> Result<Json<Vec<FeedbackRecord>>, ApiError> {
    let limit = params.limit.unwrap_or(50).clamp(1, 200);
    let offset = params.offset.unwrap_or(0).max(0);

    let repo = FeedbackRepository::new(state.pool.clone());
    Ok(Json(repo.list(limit, offset).await?))
}
