//! Feedback repository
//!
//! Governance feedback submitted from the dashboard when drift or bias is
//! suspected.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use core_kernel::UserId;

use crate::error::DatabaseError;

const FEEDBACK_COLUMNS: &str =
    "feedback_id, user_id, risk_type, severity, title, description, created_at";

/// A stored feedback entry
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FeedbackRecord {
    pub feedback_id: i64,
    pub user_id: i64,
    pub risk_type: String,
    pub severity: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Data for submitting feedback
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub user_id: UserId,
    pub risk_type: String,
    pub severity: String,
    pub title: String,
    pub description: String,
}

/// Repository for feedback entries
#[derive(Debug, Clone)]
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, feedback: NewFeedback) -> Result<FeedbackRecord, DatabaseError> {
        let insert = format!(
            "INSERT INTO feedback (user_id, risk_type, severity, title, description) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {FEEDBACK_COLUMNS}"
        );
        let record: FeedbackRecord = sqlx::query_as(&insert)
            .bind(feedback.user_id.value())
            .bind(&feedback.risk_type)
            .bind(&feedback.severity)
            .bind(&feedback.title)
            .bind(&feedback.description)
            .fetch_one(&self.pool)
            .await?;

        Ok(record)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<FeedbackRecord>, DatabaseError> {
        let query = format!(
            "SELECT {FEEDBACK_COLUMNS} FROM feedback \
             ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        Ok(sqlx::query_as(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?)
    }
}
