//! HITL queue handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use core_kernel::{Actor, ClaimId, QueueId, UserId};
use domain_hitl::ReviewDecision;
use infra_db::{HitlRepository, HitlStatistics};

use crate::dto::hitl::*;
use crate::{error::ApiError, AppState};

/// Lists pending review entries, oldest first
pub async fn pending_queue(
    State(state): State<AppState>,
    Query(params): Query<QueueParams>,
) -> Result<Json<QueueResponse>, ApiError> {
    let limit = params.limit.unwrap_or(50).clamp(1, 200);
    let repo = HitlRepository::new(state.pool.clone());
    let entries = repo.pending(limit).await?;

    Ok(Json(QueueResponse {
        total: entries.len(),
        pending_items: entries.into_iter().map(Into::into).collect(),
    }))
}

/// Gets the latest queue entry for a claim
pub async fn get_by_claim(
    State(state): State<AppState>,
    Path(claim_id): Path<String>,
) -> Result<Json<QueueEntryResponse>, ApiError> {
    let repo = HitlRepository::new(state.pool.clone());
    let entry = repo
        .get_by_claim(&ClaimId::new(claim_id.clone()))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No queue entry for claim {claim_id}")))?;

    Ok(Json(entry.into()))
}

/// Assigns a queue entry to a reviewer
pub async fn assign(
    State(state): State<AppState>,
    Path(queue_id): Path<i64>,
    Json(request): Json<AssignRequest>,
) -> Result<Json<QueueEntryResponse>, ApiError> {
    let repo = HitlRepository::new(state.pool.clone());
    let entry = repo
        .assign(QueueId::new(queue_id), UserId::new(request.user_id))
        .await?;

    Ok(Json(entry.into()))
}

/// Closes a queue entry with the reviewer's decision
///
/// Atomically commits the queue closure, the claim transition it implies,
/// and the history row. A second review of the same entry is a 409.
pub async fn submit_review(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(queue_id): Path<i64>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let decision = ReviewDecision::parse(&request.decision).ok_or_else(|| {
        ApiError::Validation(format!(
            "decision must be Approved or Denied, got '{}'",
            request.decision
        ))
    })?;

    let repo = HitlRepository::new(state.pool.clone());
    let (entry, claim, _) = repo
        .complete_review(
            QueueId::new(queue_id),
            decision,
            request.reviewer_comments,
            request.approved_amount,
            &actor,
        )
        .await?;

    Ok(Json(ReviewResponse {
        entry: entry.into(),
        claim: claim.into(),
    }))
}

/// Queue statistics overview
pub async fn statistics(
    State(state): State<AppState>,
) -> Result<Json<HitlStatistics>, ApiError> {
    let repo = HitlRepository::new(state.pool.clone());
    Ok(Json(repo.statistics().await?))
}
