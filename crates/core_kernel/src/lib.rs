//! Core Kernel - Foundational types and utilities for the claims system
//!
//! This crate provides the fundamental building blocks used across all domain
//! modules:
//! - Strongly-typed identifiers for claims, customers, and queue entries
//! - The authenticated `Actor` value threaded through every mutation
//! - The shared error taxonomy (validation, not-found, state-machine errors)

pub mod actor;
pub mod error;
pub mod identifiers;

pub use actor::{Actor, ActorRole};
pub use error::CoreError;
pub use identifiers::{ClaimId, CustomerId, HistoryId, PolicyId, QueueId, UserId};
