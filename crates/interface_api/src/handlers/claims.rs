//! Claims handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::warn;
use validator::Validate;

use core_kernel::{Actor, ActorRole, ClaimId, CustomerId, PolicyId};
use domain_claims::{Claim, ClaimStatus, NewClaim};
use domain_hitl::{GateInput, GateOutcome, HitlGate};
use domain_monitoring::{DriftConfig, DriftReport};
use infra_db::{ClaimFilter, ClaimRepository, ClaimStatistics, HitlRepository};

use crate::dto::claims::*;
use crate::{error::ApiError, AppState};

/// Creates a new claim in `Pending` with its intake history row
pub async fn create_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<CreateClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    request.validate()?;

    let intake = NewClaim {
        claim_id: ClaimId::new(request.claim_id),
        claim_name: request.claim_name,
        customer_id: CustomerId::new(request.customer_id),
        policy_id: request.policy_id.map(PolicyId::new),
        claim_type: request.claim_type,
        network_status: request.network_status,
        date_of_service: request.date_of_service,
        claim_amount: request.claim_amount,
        ai_reasoning: request.ai_reasoning,
    };
    let (claim, intake_row) = Claim::open(intake, &actor)?;

    let repo = ClaimRepository::new(state.pool.clone());
    repo.create(&claim, &intake_row).await?;

    Ok((StatusCode::CREATED, Json(claim.into())))
}

/// Lists claims with pagination and filters
pub async fn list_claims(
    State(state): State<AppState>,
    Query(params): Query<ListClaimsParams>,
) -> Result<Json<ClaimListResponse>, ApiError> {
    let status = params
        .status
        .as_deref()
        .map(|s| {
            ClaimStatus::parse(s)
                .ok_or_else(|| ApiError::Validation(format!("unknown status '{s}'")))
        })
        .transpose()?;

    let filter = ClaimFilter {
        customer_id: params.customer_id.map(CustomerId::new),
        status,
        claim_type: params.claim_type,
        limit: params.limit.unwrap_or(100).clamp(1, 500),
        offset: params.offset.unwrap_or(0).max(0),
    };

    let repo = ClaimRepository::new(state.pool.clone());
    let claims = repo.list(&filter).await?;
    let total = repo.count(&filter).await?;

    Ok(Json(ClaimListResponse {
        claims: claims.into_iter().map(Into::into).collect(),
        total,
        limit: filter.limit,
        offset: filter.offset,
    }))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Path(claim_id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let repo = ClaimRepository::new(state.pool.clone());
    let claim = repo.get(&ClaimId::new(claim_id)).await?;
    Ok(Json(claim.into()))
}

/// Proposes a status change for a claim
///
/// Terminal decisions proposed by automation pass through the HITL gate
/// first: a fraud or drift signal holds the claim in `Pending` and routes it
/// to the review queue instead of committing the proposal. Reviewer and
/// admin decisions, and withdrawals, commit directly.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(claim_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>, ApiError> {
    let claim_id = ClaimId::new(claim_id);
    let new_status = ClaimStatus::parse(&request.new_status).ok_or_else(|| {
        ApiError::Validation(format!("unknown status '{}'", request.new_status))
    })?;
    let repo = ClaimRepository::new(state.pool.clone());

    let gated = matches!(new_status, ClaimStatus::Approved | ClaimStatus::Denied)
        && !matches!(actor.role, ActorRole::Reviewer | ActorRole::Admin);
    if gated {
        let claim = repo.get(&claim_id).await?;
        let drift = latest_drift_report(&state).await;
        let outcome = HitlGate::new().assess(&GateInput {
            fraud_status: claim.guardrail_summary.fraud_status,
            fraud_reason: claim.guardrail_summary.fraud_reason.as_deref(),
            segment: claim.network_status.as_deref(),
            drift: &drift,
        });

        if let GateOutcome::Review(summary) = outcome {
            let hitl = HitlRepository::new(state.pool.clone());
            let entry = hitl.flag_for_review(&claim_id, &summary).await?;
            let held = repo.get(&claim_id).await?;
            return Ok(Json(UpdateStatusResponse {
                claim: held.into(),
                review_required: true,
                queue_id: entry.queue_id.map(|id| id.value()),
            }));
        }
    }

    let (claim, _) = repo
        .transition(
            &claim_id,
            new_status,
            &actor,
            request.change_reason,
            request.approved_amount,
        )
        .await?;

    Ok(Json(UpdateStatusResponse {
        claim: claim.into(),
        review_required: false,
        queue_id: None,
    }))
}

/// Gets the history trail for a claim
pub async fn get_history(
    State(state): State<AppState>,
    Path(claim_id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let claim_id = ClaimId::new(claim_id);
    let repo = ClaimRepository::new(state.pool.clone());
    // 404 for an unknown claim rather than an empty trail
    repo.get(&claim_id).await?;
    let history = repo.history(&claim_id).await?;

    Ok(Json(HistoryResponse {
        claim_id: claim_id.into(),
        total: history.len(),
        history: history.into_iter().map(Into::into).collect(),
    }))
}

/// Claim statistics overview
pub async fn statistics(
    State(state): State<AppState>,
) -> Result<Json<ClaimStatistics>, ApiError> {
    let repo = ClaimRepository::new(state.pool.clone());
    Ok(Json(repo.statistics().await?))
}

/// Drift report of the latest monitoring run
///
/// The drift signal is monitoring-grade, not a commit gate by itself, so a
/// feed outage degrades to "no drift" rather than blocking claim decisions.
async fn latest_drift_report(state: &AppState) -> DriftReport {
    match state.feed.latest().await {
        Ok(run) => run.drift,
        Err(err) => {
            warn!(%err, "monitoring feed unavailable, proceeding without drift signal");
            DriftReport::quiet(DriftConfig::default().threshold)
        }
    }
}
