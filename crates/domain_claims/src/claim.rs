//! Claim aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Actor, ClaimId, CustomerId, PolicyId};

use crate::error::ClaimError;
use crate::guardrail::GuardrailSummary;
use crate::history::{ClaimHistory, HistoryStatus};

/// Claim status
///
/// `Approved`, `Denied`, and `Withdrawn` are terminal; the only transition
/// allowed out of a terminal state is the explicit withdrawal override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Awaiting an automatic or human decision
    Pending,
    /// Approved for payment
    Approved,
    /// Denied
    Denied,
    /// Withdrawn by the claimant
    Withdrawn,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Denied => "Denied",
            ClaimStatus::Withdrawn => "Withdrawn",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(ClaimStatus::Pending),
            "Approved" => Some(ClaimStatus::Approved),
            "Denied" => Some(ClaimStatus::Denied),
            "Withdrawn" => Some(ClaimStatus::Withdrawn),
            _ => None,
        }
    }

    /// True once a decision (or withdrawal) has been committed
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ClaimStatus::Approved | ClaimStatus::Denied | ClaimStatus::Withdrawn
        )
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Data required to open a claim
#[derive(Debug, Clone)]
pub struct NewClaim {
    pub claim_id: ClaimId,
    pub claim_name: Option<String>,
    pub customer_id: CustomerId,
    pub policy_id: Option<PolicyId>,
    pub claim_type: Option<String>,
    pub network_status: Option<String>,
    pub date_of_service: Option<DateTime<Utc>>,
    pub claim_amount: Decimal,
    pub ai_reasoning: Option<String>,
}

/// A reimbursement claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier, immutable after intake
    pub claim_id: ClaimId,
    /// Short descriptive name
    pub claim_name: Option<String>,
    /// Owning customer
    pub customer_id: CustomerId,
    /// Policy the claim is filed against
    pub policy_id: Option<PolicyId>,
    /// Claim type (e.g. "Outpatient")
    pub claim_type: Option<String>,
    /// Provider network segment, the drift partition key
    pub network_status: Option<String>,
    /// Date the service was rendered
    pub date_of_service: Option<DateTime<Utc>>,
    /// Claimed amount
    pub claim_amount: Decimal,
    /// Amount approved for payment; zero until approval
    pub approved_amount: Decimal,
    /// Status
    pub status: ClaimStatus,
    /// Processing error classification, if any
    pub error_type: Option<String>,
    /// Explanation produced by the automated pipeline
    pub ai_reasoning: Option<String>,
    /// Payment status
    pub payment_status: String,
    /// Guardrail validation summary
    pub guardrail_summary: GuardrailSummary,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp, never decreases
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Opens a new claim in `Pending` and returns the intake history row
    ///
    /// Fails with a validation error if the claim id or customer id is
    /// missing, or the claimed amount is negative.
    pub fn open(intake: NewClaim, actor: &Actor) -> Result<(Self, ClaimHistory), ClaimError> {
        if intake.claim_id.is_empty() {
            return Err(ClaimError::Validation("claim_id must not be empty".into()));
        }
        if intake.customer_id.is_empty() {
            return Err(ClaimError::Validation(
                "customer_id must not be empty".into(),
            ));
        }
        if intake.claim_amount < Decimal::ZERO {
            return Err(ClaimError::Validation(format!(
                "claim_amount must be >= 0, got {}",
                intake.claim_amount
            )));
        }

        let now = Utc::now();
        let claim = Self {
            claim_id: intake.claim_id.clone(),
            claim_name: intake.claim_name,
            customer_id: intake.customer_id,
            policy_id: intake.policy_id,
            claim_type: intake.claim_type,
            network_status: intake.network_status,
            date_of_service: intake.date_of_service,
            claim_amount: intake.claim_amount,
            approved_amount: Decimal::ZERO,
            status: ClaimStatus::Pending,
            error_type: None,
            ai_reasoning: intake.ai_reasoning,
            payment_status: "Pending".to_string(),
            guardrail_summary: GuardrailSummary::clean(),
            created_at: now,
            updated_at: now,
        };

        let intake_row = ClaimHistory::record(
            intake.claim_id,
            HistoryStatus::New,
            ClaimStatus::Pending,
            actor,
            Some("Claim received".to_string()),
        );

        Ok((claim, intake_row))
    }

    /// Moves the claim to a new status and returns the history row to append
    ///
    /// Rejects no-op transitions and transitions out of terminal states,
    /// except the explicit withdrawal override. Approval requires an
    /// approved amount within `[0, claim_amount]`.
    pub fn transition(
        &mut self,
        new_status: ClaimStatus,
        actor: &Actor,
        reason: Option<String>,
        approved_amount: Option<Decimal>,
    ) -> Result<ClaimHistory, ClaimError> {
        if !self.can_transition_to(new_status) {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.status.as_str().to_string(),
                to: new_status.as_str().to_string(),
            });
        }

        if new_status == ClaimStatus::Approved {
            let approved = approved_amount.ok_or(ClaimError::MissingApprovedAmount)?;
            if approved < Decimal::ZERO || approved > self.claim_amount {
                return Err(ClaimError::ApprovedAmountOutOfRange {
                    approved,
                    claimed: self.claim_amount,
                });
            }
            self.approved_amount = approved;
        }

        let old_status = HistoryStatus::from(self.status);
        self.status = new_status;
        self.updated_at = Utc::now();

        Ok(ClaimHistory::record(
            self.claim_id.clone(),
            old_status,
            new_status,
            actor,
            reason,
        ))
    }

    /// Checks if a transition is valid
    pub fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (self.status, target),
            (Pending, Approved) |
            (Pending, Denied) |
            // Withdrawal override, allowed even out of a terminal decision
            (Pending, Withdrawn) |
            (Approved, Withdrawn) |
            (Denied, Withdrawn)
        )
    }

    /// Applies a guardrail summary, keeping `updated_at` monotonic
    pub fn set_guardrail_summary(&mut self, summary: GuardrailSummary) {
        self.guardrail_summary = summary;
        self.updated_at = Utc::now().max(self.updated_at);
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn any_status() -> impl Strategy<Value = ClaimStatus> {
        prop_oneof![
            Just(ClaimStatus::Pending),
            Just(ClaimStatus::Approved),
            Just(ClaimStatus::Denied),
            Just(ClaimStatus::Withdrawn),
        ]
    }

    proptest! {
        /// After any successful transition the returned history row matches
        /// the claim: old_status is the status before the call, new_status
        /// is the status after.
        #[test]
        fn history_row_matches_transition(target in any_status(), amount in 0i64..1_000_000i64) {
            let intake = NewClaim {
                claim_id: ClaimId::new("CLM-P"),
                claim_name: None,
                customer_id: CustomerId::new("CUST-P"),
                policy_id: None,
                claim_type: None,
                network_status: None,
                date_of_service: None,
                claim_amount: Decimal::new(amount, 2),
                ai_reasoning: None,
            };
            let (mut claim, _) = Claim::open(intake, &core_kernel::Actor::ai_agent()).unwrap();
            let before = claim.status;
            let approved = (target == ClaimStatus::Approved).then(|| dec!(0));

            if let Ok(row) = claim.transition(target, &core_kernel::Actor::ai_agent(), None, approved) {
                prop_assert_eq!(row.old_status, HistoryStatus::from(before));
                prop_assert_eq!(row.new_status, claim.status);
                prop_assert_eq!(claim.status, target);
            } else {
                // Failed transitions must leave the claim untouched
                prop_assert_eq!(claim.status, before);
            }
        }
    }
}
