//! Human-in-the-Loop Domain
//!
//! Decides whether a claim must pass through human review before reaching a
//! terminal status, and models the review queue entries a flagged claim
//! produces. The gate itself is deterministic: fraud signal first, drift
//! signal second, otherwise the proposed decision commits directly.

pub mod error;
pub mod gate;
pub mod queue;

pub use error::HitlError;
pub use gate::{GateInput, GateOutcome, HitlGate};
pub use queue::{HitlQueueEntry, ReviewDecision, ReviewStatus};
