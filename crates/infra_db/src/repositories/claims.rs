//! Claims repository
//!
//! Canonical claim state plus its append-only history trail. Transitions are
//! committed under a row lock so the status update and its history row are
//! observed together or not at all.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{PgPool, Row};
use thiserror::Error;
use tracing::{info, instrument};

use core_kernel::{Actor, ClaimId, CustomerId, HistoryId, PolicyId};
use domain_claims::{Claim, ClaimError, ClaimHistory, ClaimStatus, GuardrailSummary, HistoryStatus};

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str = "claim_id, claim_name, customer_id, policy_id, claim_type, \
     network_status, date_of_service, claim_amount, approved_amount, claim_status, \
     error_type, ai_reasoning, payment_status, guardrail_summary, created_at, updated_at";

const HISTORY_COLUMNS: &str =
    "history_id, claim_id, old_status, new_status, changed_by, role, change_reason, timestamp";

/// Failure of a claim-store operation: either the domain rejected it or the
/// database did
#[derive(Debug, Error)]
pub enum ClaimStoreError {
    #[error(transparent)]
    Domain(#[from] ClaimError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for ClaimStoreError {
    fn from(err: sqlx::Error) -> Self {
        ClaimStoreError::Database(err.into())
    }
}

/// Filters for listing claims
#[derive(Debug, Clone, Default)]
pub struct ClaimFilter {
    pub customer_id: Option<CustomerId>,
    pub status: Option<ClaimStatus>,
    pub claim_type: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl ClaimFilter {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit,
            offset,
            ..Self::default()
        }
    }
}

/// Aggregate counts for the dashboard overview
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ClaimStatistics {
    pub total: i64,
    pub approved: i64,
    pub pending: i64,
    pub denied: i64,
    pub withdrawn: i64,
    pub total_amount: Decimal,
    pub approved_amount: Decimal,
}

/// Repository for claim state and history
#[derive(Debug, Clone)]
pub struct ClaimRepository {
    pool: PgPool,
}

impl ClaimRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a freshly-opened claim with its intake history row
    ///
    /// The claim insert and the `New -> Pending` history row commit in one
    /// transaction. A duplicate claim id surfaces as
    /// `ClaimError::DuplicateClaim`.
    #[instrument(skip_all, fields(claim_id = %claim.claim_id))]
    pub async fn create(
        &self,
        claim: &Claim,
        intake: &ClaimHistory,
    ) -> Result<ClaimHistory, ClaimStoreError> {
        let mut tx = self.pool.begin().await?;

        let insert = format!(
            "INSERT INTO proposedclaim ({CLAIM_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)"
        );
        let guardrail = serde_json::to_value(&claim.guardrail_summary)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let result = sqlx::query(&insert)
            .bind(claim.claim_id.as_str())
            .bind(&claim.claim_name)
            .bind(claim.customer_id.as_str())
            .bind(claim.policy_id.as_ref().map(|p| p.as_str().to_string()))
            .bind(&claim.claim_type)
            .bind(&claim.network_status)
            .bind(claim.date_of_service)
            .bind(claim.claim_amount)
            .bind(claim.approved_amount)
            .bind(claim.status.as_str())
            .bind(&claim.error_type)
            .bind(&claim.ai_reasoning)
            .bind(&claim.payment_status)
            .bind(guardrail)
            .bind(claim.created_at)
            .bind(claim.updated_at)
            .execute(&mut *tx)
            .await;

        if let Err(err) = result {
            let mapped = DatabaseError::from(err);
            if matches!(mapped, DatabaseError::DuplicateEntry(_)) {
                return Err(ClaimError::DuplicateClaim(claim.claim_id.clone()).into());
            }
            return Err(mapped.into());
        }

        let recorded = insert_history(&mut tx, intake).await?;
        tx.commit().await?;

        info!("claim created");
        Ok(recorded)
    }

    /// Retrieves a claim by its identifier
    pub async fn get(&self, claim_id: &ClaimId) -> Result<Claim, ClaimStoreError> {
        let query = format!("SELECT {CLAIM_COLUMNS} FROM proposedclaim WHERE claim_id = $1");
        let row: Option<ClaimRow> = sqlx::query_as(&query)
            .bind(claim_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or_else(|| ClaimError::ClaimNotFound(claim_id.clone()).into())
            .and_then(|r| r.into_domain().map_err(Into::into))
    }

    /// Lists claims, newest first
    pub async fn list(&self, filter: &ClaimFilter) -> Result<Vec<Claim>, ClaimStoreError> {
        let mut qb = sqlx::QueryBuilder::new(format!(
            "SELECT {CLAIM_COLUMNS} FROM proposedclaim WHERE 1=1"
        ));
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ");
        qb.push_bind(filter.limit);
        qb.push(" OFFSET ");
        qb.push_bind(filter.offset);

        let rows: Vec<ClaimRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter()
            .map(|r| r.into_domain().map_err(Into::into))
            .collect()
    }

    /// Counts claims matching the filter (ignoring pagination)
    pub async fn count(&self, filter: &ClaimFilter) -> Result<i64, ClaimStoreError> {
        let mut qb = sqlx::QueryBuilder::new("SELECT COUNT(*) FROM proposedclaim WHERE 1=1");
        push_filters(&mut qb, filter);

        let row = qb.build().fetch_one(&self.pool).await?;
        Ok(row.try_get::<i64, _>(0).map_err(DatabaseError::from)?)
    }

    /// Commits a status transition
    ///
    /// Locks the claim row, validates the transition through the aggregate,
    /// and commits the status update together with its history row.
    #[instrument(skip_all, fields(claim_id = %claim_id, new_status = %new_status))]
    pub async fn transition(
        &self,
        claim_id: &ClaimId,
        new_status: ClaimStatus,
        actor: &Actor,
        reason: Option<String>,
        approved_amount: Option<Decimal>,
    ) -> Result<(Claim, ClaimHistory), ClaimStoreError> {
        let mut tx = self.pool.begin().await?;

        let mut claim = lock_claim(&mut tx, claim_id).await?;
        let history = claim.transition(new_status, actor, reason, approved_amount)?;

        persist_claim_status(&mut tx, &claim).await?;
        let recorded = insert_history(&mut tx, &history).await?;
        tx.commit().await?;

        info!(old_status = %recorded.old_status, "claim transitioned");
        Ok((claim, recorded))
    }

    /// Returns the full history trail for a claim, oldest first
    pub async fn history(&self, claim_id: &ClaimId) -> Result<Vec<ClaimHistory>, ClaimStoreError> {
        let query = format!(
            "SELECT {HISTORY_COLUMNS} FROM claimhistory \
             WHERE claim_id = $1 ORDER BY timestamp ASC, history_id ASC"
        );
        let rows: Vec<HistoryRow> = sqlx::query_as(&query)
            .bind(claim_id.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|r| r.into_domain().map_err(Into::into))
            .collect()
    }

    /// Status counts and amount totals across all claims
    pub async fn statistics(&self) -> Result<ClaimStatistics, ClaimStoreError> {
        let stats: ClaimStatistics = sqlx::query_as(
            "SELECT \
                COUNT(*) AS total, \
                COUNT(*) FILTER (WHERE claim_status = 'Approved') AS approved, \
                COUNT(*) FILTER (WHERE claim_status = 'Pending') AS pending, \
                COUNT(*) FILTER (WHERE claim_status = 'Denied') AS denied, \
                COUNT(*) FILTER (WHERE claim_status = 'Withdrawn') AS withdrawn, \
                COALESCE(SUM(claim_amount), 0) AS total_amount, \
                COALESCE(SUM(approved_amount), 0) AS approved_amount \
             FROM proposedclaim",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Replaces a claim's guardrail summary
    pub async fn update_guardrail(
        &self,
        claim_id: &ClaimId,
        summary: &GuardrailSummary,
    ) -> Result<(), ClaimStoreError> {
        let guardrail = serde_json::to_value(summary)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE proposedclaim SET guardrail_summary = $2, updated_at = NOW() \
             WHERE claim_id = $1",
        )
        .bind(claim_id.as_str())
        .bind(guardrail)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ClaimError::ClaimNotFound(claim_id.clone()).into());
        }
        Ok(())
    }
}

fn push_filters(qb: &mut sqlx::QueryBuilder<'_, sqlx::Postgres>, filter: &ClaimFilter) {
    if let Some(customer) = &filter.customer_id {
        qb.push(" AND customer_id = ");
        qb.push_bind(customer.as_str().to_string());
    }
    if let Some(status) = filter.status {
        qb.push(" AND claim_status = ");
        qb.push_bind(status.as_str());
    }
    if let Some(claim_type) = &filter.claim_type {
        qb.push(" AND claim_type = ");
        qb.push_bind(claim_type.clone());
    }
}

/// Locks a claim row for the duration of the surrounding transaction
pub(crate) async fn lock_claim(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    claim_id: &ClaimId,
) -> Result<Claim, ClaimStoreError> {
    let query = format!("SELECT {CLAIM_COLUMNS} FROM proposedclaim WHERE claim_id = $1 FOR UPDATE");
    let row: Option<ClaimRow> = sqlx::query_as(&query)
        .bind(claim_id.as_str())
        .fetch_optional(&mut **tx)
        .await?;

    row.ok_or_else(|| ClaimError::ClaimNotFound(claim_id.clone()).into())
        .and_then(|r| r.into_domain().map_err(Into::into))
}

/// Writes the mutable claim columns after an aggregate-level transition
pub(crate) async fn persist_claim_status(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    claim: &Claim,
) -> Result<(), ClaimStoreError> {
    sqlx::query(
        "UPDATE proposedclaim \
         SET claim_status = $2, approved_amount = $3, updated_at = $4 \
         WHERE claim_id = $1",
    )
    .bind(claim.claim_id.as_str())
    .bind(claim.status.as_str())
    .bind(claim.approved_amount)
    .bind(claim.updated_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Appends a history row inside the caller's transaction
pub(crate) async fn insert_history(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    entry: &ClaimHistory,
) -> Result<ClaimHistory, ClaimStoreError> {
    let row = sqlx::query(
        "INSERT INTO claimhistory \
             (claim_id, old_status, new_status, changed_by, role, change_reason, timestamp) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING history_id",
    )
    .bind(entry.claim_id.as_str())
    .bind(entry.old_status.as_str())
    .bind(entry.new_status.as_str())
    .bind(&entry.changed_by)
    .bind(&entry.role)
    .bind(&entry.change_reason)
    .bind(entry.timestamp)
    .fetch_one(&mut **tx)
    .await?;

    let history_id: i64 = row.try_get("history_id").map_err(DatabaseError::from)?;
    let mut recorded = entry.clone();
    recorded.history_id = Some(HistoryId::new(history_id));
    Ok(recorded)
}

/// Database row for a claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct ClaimRow {
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
    pub guardrail_summary: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClaimRow {
    pub(crate) fn into_domain(self) -> Result<Claim, DatabaseError> {
        let status = ClaimStatus::parse(&self.claim_status).ok_or_else(|| {
            DatabaseError::CorruptRow(format!(
                "claim {} has unknown status '{}'",
                self.claim_id, self.claim_status
            ))
        })?;
        let guardrail_summary: GuardrailSummary = serde_json::from_value(self.guardrail_summary)
            .map_err(|e| {
                DatabaseError::CorruptRow(format!(
                    "claim {} has malformed guardrail summary: {e}",
                    self.claim_id
                ))
            })?;

        Ok(Claim {
            claim_id: ClaimId::new(self.claim_id),
            claim_name: self.claim_name,
            customer_id: CustomerId::new(self.customer_id),
            policy_id: self.policy_id.map(PolicyId::new),
            claim_type: self.claim_type,
            network_status: self.network_status,
            date_of_service: self.date_of_service,
            claim_amount: self.claim_amount,
            approved_amount: self.approved_amount,
            status,
            error_type: self.error_type,
            ai_reasoning: self.ai_reasoning,
            payment_status: self.payment_status,
            guardrail_summary,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Database row for a history entry
#[derive(Debug, Clone, sqlx::FromRow)]
struct HistoryRow {
    history_id: i64,
    claim_id: String,
    old_status: String,
    new_status: String,
    changed_by: String,
    role: String,
    change_reason: Option<String>,
    timestamp: DateTime<Utc>,
}

impl HistoryRow {
    fn into_domain(self) -> Result<ClaimHistory, DatabaseError> {
        let old_status = HistoryStatus::parse(&self.old_status).ok_or_else(|| {
            DatabaseError::CorruptRow(format!("unknown old_status '{}'", self.old_status))
        })?;
        let new_status = ClaimStatus::parse(&self.new_status).ok_or_else(|| {
            DatabaseError::CorruptRow(format!("unknown new_status '{}'", self.new_status))
        })?;

        Ok(ClaimHistory {
            history_id: Some(HistoryId::new(self.history_id)),
            claim_id: ClaimId::new(self.claim_id),
            old_status,
            new_status,
            changed_by: self.changed_by,
            role: self.role,
            change_reason: self.change_reason,
            timestamp: self.timestamp,
        })
    }
}
