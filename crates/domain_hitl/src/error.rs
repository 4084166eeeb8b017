//! HITL domain errors

use core_kernel::{ClaimId, QueueId};
use domain_claims::ClaimError;
use thiserror::Error;

/// Errors that can occur in the HITL domain
#[derive(Debug, Error)]
pub enum HitlError {
    #[error("Queue entry not found: {0}")]
    QueueEntryNotFound(QueueId),

    #[error("Queue entry for claim {0} was already reviewed")]
    AlreadyReviewed(ClaimId),

    #[error(transparent)]
    Claim(#[from] ClaimError),
}
