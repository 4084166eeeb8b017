//! Claims domain errors

use core_kernel::ClaimId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(ClaimId),

    #[error("Claim already exists: {0}")]
    DuplicateClaim(ClaimId),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Approving a claim requires an approved amount")]
    MissingApprovedAmount,

    #[error("Approved amount {approved} is outside [0, {claimed}]")]
    ApprovedAmountOutOfRange { approved: Decimal, claimed: Decimal },
}

impl ClaimError {
    /// True for user-correctable input errors (4xx with field detail)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClaimError::Validation(_)
                | ClaimError::MissingApprovedAmount
                | ClaimError::ApprovedAmountOutOfRange { .. }
        )
    }
}
