//! HITL queue DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_hitl::HitlQueueEntry;

use crate::dto::claims::ClaimResponse;

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub decision: String,
    pub reviewer_comments: Option<String>,
    /// Amount to approve; defaults to the full claimed amount
    pub approved_amount: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct QueueParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct QueueEntryResponse {
    pub queue_id: Option<i64>,
    pub claim_id: String,
    pub assigned_to: Option<i64>,
    pub status: String,
    pub reviewer_comments: Option<String>,
    pub decision: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl From<HitlQueueEntry> for QueueEntryResponse {
    fn from(entry: HitlQueueEntry) -> Self {
        Self {
            queue_id: entry.queue_id.map(|id| id.value()),
            claim_id: entry.claim_id.into(),
            assigned_to: entry.assigned_to.map(|id| id.value()),
            status: entry.status.as_str().to_string(),
            reviewer_comments: entry.reviewer_comments,
            decision: entry.decision.map(|d| d.as_str().to_string()),
            created_at: entry.created_at,
            reviewed_at: entry.reviewed_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QueueResponse {
    pub pending_items: Vec<QueueEntryResponse>,
    pub total: usize,
}

/// Result of a completed review: the closed entry plus the claim it decided
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub entry: QueueEntryResponse,
    pub claim: ClaimResponse,
}
