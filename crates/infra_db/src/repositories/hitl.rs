//! HITL queue repository
//!
//! Queue entries are created when the gate flags a claim and closed by a
//! reviewer decision. Closure is atomic with the claim transition: the entry
//! update, the claim update, and the history row commit in one transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, instrument};

use core_kernel::{Actor, ClaimId, QueueId, UserId};
use domain_claims::{Claim, ClaimError, ClaimHistory, GuardrailSummary};
use domain_hitl::{HitlError, HitlQueueEntry, ReviewDecision, ReviewStatus};

use crate::error::DatabaseError;
use crate::repositories::claims::{insert_history, lock_claim, persist_claim_status};

const QUEUE_COLUMNS: &str = "queue_id, claim_id, assigned_to, status, reviewer_comments, \
     decision, created_at, reviewed_at";

/// Failure of a HITL store operation
#[derive(Debug, Error)]
pub enum HitlStoreError {
    #[error(transparent)]
    Domain(#[from] HitlError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for HitlStoreError {
    fn from(err: sqlx::Error) -> Self {
        HitlStoreError::Database(err.into())
    }
}

impl From<ClaimError> for HitlStoreError {
    fn from(err: ClaimError) -> Self {
        HitlStoreError::Domain(err.into())
    }
}

impl From<super::claims::ClaimStoreError> for HitlStoreError {
    fn from(err: super::claims::ClaimStoreError) -> Self {
        match err {
            super::claims::ClaimStoreError::Domain(e) => HitlStoreError::Domain(e.into()),
            super::claims::ClaimStoreError::Database(e) => HitlStoreError::Database(e),
        }
    }
}

/// Queue counts for the dashboard
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HitlStatistics {
    pub total: i64,
    pub pending: i64,
    pub completed: i64,
    pub assigned: i64,
}

/// Repository for review queue entries
#[derive(Debug, Clone)]
pub struct HitlRepository {
    pool: PgPool,
}

impl HitlRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Routes a flagged claim into the review queue
    ///
    /// Idempotent: if the claim already has an open entry, that entry is
    /// returned untouched. Otherwise a new entry is created and the claim's
    /// guardrail summary is updated, all under the claim-row lock.
    #[instrument(skip_all, fields(claim_id = %claim_id))]
    pub async fn flag_for_review(
        &self,
        claim_id: &ClaimId,
        summary: &GuardrailSummary,
    ) -> Result<HitlQueueEntry, HitlStoreError> {
        let mut tx = self.pool.begin().await?;

        // Serializes with concurrent transitions on the same claim
        let claim = lock_claim(&mut tx, claim_id).await?;

        let query = format!(
            "SELECT {QUEUE_COLUMNS} FROM hitlqueue \
             WHERE claim_id = $1 AND reviewed_at IS NULL"
        );
        let open: Option<QueueRow> = sqlx::query_as(&query)
            .bind(claim_id.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(row) = open {
            tx.commit().await?;
            info!("claim already queued for review");
            return row.into_domain().map_err(Into::into);
        }

        let insert = format!(
            "INSERT INTO hitlqueue (claim_id) VALUES ($1) RETURNING {QUEUE_COLUMNS}"
        );
        let row: QueueRow = sqlx::query_as(&insert)
            .bind(claim_id.as_str())
            .fetch_one(&mut *tx)
            .await?;

        let guardrail = serde_json::to_value(summary)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        sqlx::query(
            "UPDATE proposedclaim SET guardrail_summary = $2, updated_at = NOW() \
             WHERE claim_id = $1",
        )
        .bind(claim.claim_id.as_str())
        .bind(guardrail)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("claim routed to review queue");
        row.into_domain().map_err(Into::into)
    }

    /// Pending entries, oldest first
    pub async fn pending(&self, limit: i64) -> Result<Vec<HitlQueueEntry>, HitlStoreError> {
        let query = format!(
            "SELECT {QUEUE_COLUMNS} FROM hitlqueue \
             WHERE status = 'Pending' ORDER BY created_at ASC LIMIT $1"
        );
        let rows: Vec<QueueRow> = sqlx::query_as(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|r| r.into_domain().map_err(Into::into))
            .collect()
    }

    /// Retrieves an entry by queue id
    pub async fn get(&self, queue_id: QueueId) -> Result<HitlQueueEntry, HitlStoreError> {
        let query = format!("SELECT {QUEUE_COLUMNS} FROM hitlqueue WHERE queue_id = $1");
        let row: Option<QueueRow> = sqlx::query_as(&query)
            .bind(queue_id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or(HitlError::QueueEntryNotFound(queue_id))
            .map_err(Into::into)
            .and_then(|r| r.into_domain().map_err(Into::into))
    }

    /// Latest entry for a claim, if any
    pub async fn get_by_claim(
        &self,
        claim_id: &ClaimId,
    ) -> Result<Option<HitlQueueEntry>, HitlStoreError> {
        let query = format!(
            "SELECT {QUEUE_COLUMNS} FROM hitlqueue \
             WHERE claim_id = $1 ORDER BY created_at DESC LIMIT 1"
        );
        let row: Option<QueueRow> = sqlx::query_as(&query)
            .bind(claim_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_domain().map_err(Into::into)).transpose()
    }

    /// Assigns an open entry to a reviewer
    pub async fn assign(
        &self,
        queue_id: QueueId,
        reviewer: UserId,
    ) -> Result<HitlQueueEntry, HitlStoreError> {
        let mut tx = self.pool.begin().await?;

        let mut entry = lock_entry(&mut tx, queue_id).await?;
        entry.assign(reviewer)?;

        sqlx::query("UPDATE hitlqueue SET assigned_to = $2 WHERE queue_id = $1")
            .bind(queue_id.value())
            .bind(reviewer.value())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(entry)
    }

    /// Closes an entry with the reviewer's decision and commits the claim
    /// transition it implies
    ///
    /// Atomic: the queue close, the claim status update, and the history row
    /// commit together or not at all. When approving without an explicit
    /// amount, the full claimed amount is approved.
    #[instrument(skip_all, fields(queue_id = %queue_id, decision = %decision))]
    pub async fn complete_review(
        &self,
        queue_id: QueueId,
        decision: ReviewDecision,
        comments: Option<String>,
        approved_amount: Option<Decimal>,
        actor: &Actor,
    ) -> Result<(HitlQueueEntry, Claim, ClaimHistory), HitlStoreError> {
        let mut tx = self.pool.begin().await?;

        let mut entry = lock_entry(&mut tx, queue_id).await?;
        entry.close(decision, comments)?;

        let mut claim = lock_claim(&mut tx, &entry.claim_id).await?;
        let amount = match decision {
            ReviewDecision::Approved => Some(approved_amount.unwrap_or(claim.claim_amount)),
            ReviewDecision::Denied => None,
        };
        let history = claim.transition(
            decision.to_claim_status(),
            actor,
            entry.reviewer_comments.clone(),
            amount,
        )?;

        sqlx::query(
            "UPDATE hitlqueue \
             SET status = $2, decision = $3, reviewer_comments = $4, reviewed_at = $5 \
             WHERE queue_id = $1",
        )
        .bind(queue_id.value())
        .bind(entry.status.as_str())
        .bind(entry.decision.map(|d| d.as_str()))
        .bind(&entry.reviewer_comments)
        .bind(entry.reviewed_at)
        .execute(&mut *tx)
        .await?;

        persist_claim_status(&mut tx, &claim).await?;
        let recorded = insert_history(&mut tx, &history).await?;
        tx.commit().await?;

        info!(claim_id = %claim.claim_id, new_status = %claim.status, "review completed");
        Ok((entry, claim, recorded))
    }

    /// Queue counts for the dashboard
    pub async fn statistics(&self) -> Result<HitlStatistics, HitlStoreError> {
        let stats: HitlStatistics = sqlx::query_as(
            "SELECT \
                COUNT(*) AS total, \
                COUNT(*) FILTER (WHERE status = 'Pending') AS pending, \
                COUNT(*) FILTER (WHERE reviewed_at IS NOT NULL) AS completed, \
                COUNT(*) FILTER (WHERE assigned_to IS NOT NULL) AS assigned \
             FROM hitlqueue",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}

async fn lock_entry(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    queue_id: QueueId,
) -> Result<HitlQueueEntry, HitlStoreError> {
    let query = format!("SELECT {QUEUE_COLUMNS} FROM hitlqueue WHERE queue_id = $1 FOR UPDATE");
    let row: Option<QueueRow> = sqlx::query_as(&query)
        .bind(queue_id.value())
        .fetch_optional(&mut **tx)
        .await?;

    row.ok_or(HitlError::QueueEntryNotFound(queue_id))
        .map_err(Into::into)
        .and_then(|r| r.into_domain().map_err(Into::into))
}

/// Database row for a queue entry
#[derive(Debug, Clone, sqlx::FromRow)]
struct QueueRow {
    queue_id: i64,
    claim_id: String,
    assigned_to: Option<i64>,
    status: String,
    reviewer_comments: Option<String>,
    decision: Option<String>,
    created_at: DateTime<Utc>,
    reviewed_at: Option<DateTime<Utc>>,
}

impl QueueRow {
    fn into_domain(self) -> Result<HitlQueueEntry, DatabaseError> {
        let status = ReviewStatus::parse(&self.status).ok_or_else(|| {
            DatabaseError::CorruptRow(format!(
                "queue entry {} has unknown status '{}'",
                self.queue_id, self.status
            ))
        })?;
        let decision = self
            .decision
            .as_deref()
            .map(|d| {
                ReviewDecision::parse(d).ok_or_else(|| {
                    DatabaseError::CorruptRow(format!(
                        "queue entry {} has unknown decision '{d}'",
                        self.queue_id
                    ))
                })
            })
            .transpose()?;

        Ok(HitlQueueEntry {
            queue_id: Some(QueueId::new(self.queue_id)),
            claim_id: ClaimId::new(self.claim_id),
            assigned_to: self.assigned_to.map(UserId::new),
            status,
            reviewer_comments: self.reviewer_comments,
            decision,
            created_at: self.created_at,
            reviewed_at: self.reviewed_at,
        })
    }
}
