//! Claims Domain
//!
//! This crate implements the claim lifecycle from intake through terminal
//! decision, with every transition recorded in an append-only history trail.
//!
//! # Claim Lifecycle
//!
//! ```text
//! (New) -> Pending -> Approved/Denied
//!                 \-> Withdrawn  (also reachable from Approved/Denied)
//! ```
//!
//! `New` is a pseudo-state that only ever appears as the `old_status` of the
//! intake history row; a claim is born `Pending`.

pub mod claim;
pub mod error;
pub mod guardrail;
pub mod history;

pub use claim::{Claim, ClaimStatus, NewClaim};
pub use error::ClaimError;
pub use guardrail::{FraudStatus, GuardrailSummary};
pub use history::{ClaimHistory, HistoryStatus};
