//! User repository
//!
//! Reviewer and dashboard identities. Authentication token issuance lives at
//! the API layer; this repository only stores the accounts it refers to.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use core_kernel::UserId;

use crate::error::DatabaseError;

const USER_COLUMNS: &str =
    "user_id, username, email, password_hash, role, is_active, created_at, updated_at";

/// A stored user account
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserRecord {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: String,
}

/// Repository for user accounts
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: NewUser) -> Result<UserRecord, DatabaseError> {
        let insert = format!(
            "INSERT INTO users (username, email, password_hash, role) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        );
        let record: UserRecord = sqlx::query_as(&insert)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.role)
            .fetch_one(&self.pool)
            .await?;

        Ok(record)
    }

    pub async fn get(&self, user_id: UserId) -> Result<UserRecord, DatabaseError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        sqlx::query_as(&query)
            .bind(user_id.value())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("User", user_id))
    }

    pub async fn get_by_username(&self, username: &str) -> Result<UserRecord, DatabaseError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("User", username))
    }

    pub async fn list_active(&self) -> Result<Vec<UserRecord>, DatabaseError> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE is_active ORDER BY username ASC"
        );
        Ok(sqlx::query_as(&query).fetch_all(&self.pool).await?)
    }
}
