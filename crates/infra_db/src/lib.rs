//! Infrastructure Database Layer
//!
//! This crate provides database access for the claims system on PostgreSQL
//! using SQLx, following the repository pattern: domain aggregates stay pure
//! and the repositories here own persistence, locking, and transactions.
//!
//! # Write discipline
//!
//! Every mutation of a claim runs inside a transaction that locks the claim
//! row (`SELECT ... FOR UPDATE`) and commits the paired history insert in
//! the same transaction, so a reader never observes a claim whose status
//! changed without its history row.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, ClaimRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/claims")).await?;
//! let repo = ClaimRepository::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repositories::claims::{ClaimFilter, ClaimRepository, ClaimStatistics, ClaimStoreError};
pub use repositories::feedback::{FeedbackRecord, FeedbackRepository, NewFeedback};
pub use repositories::hitl::{HitlRepository, HitlStatistics, HitlStoreError};
pub use repositories::users::{NewUser, UserRecord, UserRepository};

/// Embedded schema migrations
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
