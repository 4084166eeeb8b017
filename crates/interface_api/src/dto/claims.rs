//! Claims DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_claims::{Claim, ClaimHistory, GuardrailSummary};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClaimRequest {
    #[validate(length(min = 1, max = 50))]
    pub claim_id: String,
    #[validate(length(max = 200))]
    pub claim_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub customer_id: String,
    #[validate(length(max = 50))]
    pub policy_id: Option<String>,
    #[validate(length(max = 50))]
    pub claim_type: Option<String>,
    #[validate(length(max = 50))]
    pub network_status: Option<String>,
    pub date_of_service: Option<DateTime<Utc>>,
    pub claim_amount: Decimal,
    pub ai_reasoning: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub new_status: String,
    pub change_reason: Option<String>,
    /// Required semantics only when approving; bounded by the claimed amount
    pub approved_amount: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct ListClaimsParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub customer_id: Option<String>,
    pub status: Option<String>,
    pub claim_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub claim_id: String,
    pub claim_name: Option<String>,
    pub customer_id: String,
    pub policy_id: Option<String>,
    pub claim_type: Option<String>,
    pub network_status: Option<String>,
    pub date_of_service: Option<DateTime<Utc>>,
    pub claim_amount: Decimal,
    pub approved_amount: Decimal,
    pub claim_status: String,
    pub error_type: Option<String>,
    pub ai_reasoning: Option<String>,
    pub payment_status: String,
    pub guardrail_summary: GuardrailSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            claim_id: claim.claim_id.into(),
            claim_name: claim.claim_name,
            customer_id: claim.customer_id.into(),
            policy_id: claim.policy_id.map(Into::into),
            claim_type: claim.claim_type,
            network_status: claim.network_status,
            date_of_service: claim.date_of_service,
            claim_amount: claim.claim_amount,
            approved_amount: claim.approved_amount,
            claim_status: claim.status.as_str().to_string(),
            error_type: claim.error_type,
            ai_reasoning: claim.ai_reasoning,
            payment_status: claim.payment_status,
            guardrail_summary: claim.guardrail_summary,
            created_at: claim.created_at,
            updated_at: claim.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimListResponse {
    pub claims: Vec<ClaimResponse>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Outcome of a status proposal: either the committed transition, or the
/// claim held for review with its queue entry
#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub claim: ClaimResponse,
    pub review_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntryResponse {
    pub history_id: Option<i64>,
    pub old_status: String,
    pub new_status: String,
    pub changed_by: String,
    pub role: String,
    pub change_reason: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<ClaimHistory> for HistoryEntryResponse {
    fn from(entry: ClaimHistory) -> Self {
        Self {
            history_id: entry.history_id.map(|id| id.value()),
            old_status: entry.old_status.as_str().to_string(),
            new_status: entry.new_status.as_str().to_string(),
            changed_by: entry.changed_by,
            role: entry.role,
            change_reason: entry.change_reason,
            timestamp: entry.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub claim_id: String,
    pub history: Vec<HistoryEntryResponse>,
    pub total: usize,
}
