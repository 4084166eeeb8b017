//! Comprehensive tests for domain_claims

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Actor, ActorRole, ClaimId, CustomerId, PolicyId};

use domain_claims::claim::{Claim, ClaimStatus, NewClaim};
use domain_claims::error::ClaimError;
use domain_claims::guardrail::{FraudStatus, GuardrailSummary};
use domain_claims::history::{is_consistent_sequence, HistoryStatus};

fn intake(claim_id: &str, amount: Decimal) -> NewClaim {
    NewClaim {
        claim_id: ClaimId::new(claim_id),
        claim_name: Some("Imaging series".to_string()),
        customer_id: CustomerId::new("CUST-204"),
        policy_id: Some(PolicyId::new("POL-88")),
        claim_type: Some("Diagnostic".to_string()),
        network_status: Some("NET-03".to_string()),
        date_of_service: None,
        claim_amount: amount,
        ai_reasoning: Some("Codes match the procedure record".to_string()),
    }
}

fn agent() -> Actor {
    Actor::ai_agent()
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

mod lifecycle_tests {
    use super::*;

    #[test]
    fn test_full_approval_path() {
        let (mut claim, intake_row) = Claim::open(intake("CLM-100", dec!(750.00)), &agent()).unwrap();
        let approval = claim
            .transition(
                ClaimStatus::Approved,
                &Actor::reviewer("mwilson"),
                Some("Covered service".to_string()),
                Some(dec!(700.00)),
            )
            .unwrap();

        assert_eq!(claim.status, ClaimStatus::Approved);
        assert_eq!(claim.approved_amount, dec!(700.00));
        assert!(is_consistent_sequence(&[intake_row, approval]));
    }

    #[test]
    fn test_denial_keeps_approved_amount_zero() {
        let (mut claim, _) = Claim::open(intake("CLM-101", dec!(750.00)), &agent()).unwrap();
        claim
            .transition(ClaimStatus::Denied, &agent(), None, None)
            .unwrap();

        assert_eq!(claim.approved_amount, Decimal::ZERO);
    }

    #[test]
    fn test_denied_then_approved_is_rejected() {
        let (mut claim, _) = Claim::open(intake("CLM-102", dec!(750.00)), &agent()).unwrap();
        claim
            .transition(ClaimStatus::Denied, &agent(), None, None)
            .unwrap();

        let err = claim
            .transition(ClaimStatus::Approved, &agent(), None, Some(dec!(10)))
            .unwrap_err();
        assert!(matches!(err, ClaimError::InvalidStatusTransition { .. }));
        assert_eq!(claim.status, ClaimStatus::Denied);
    }

    #[test]
    fn test_zero_amount_claim_is_valid() {
        let (claim, _) = Claim::open(intake("CLM-103", dec!(0)), &agent()).unwrap();
        assert_eq!(claim.claim_amount, Decimal::ZERO);
    }

    #[test]
    fn test_zero_approval_on_zero_claim() {
        let (mut claim, _) = Claim::open(intake("CLM-104", dec!(0)), &agent()).unwrap();
        claim
            .transition(ClaimStatus::Approved, &agent(), None, Some(dec!(0)))
            .unwrap();
        assert_eq!(claim.approved_amount, Decimal::ZERO);
    }

    #[test]
    fn test_history_actor_attribution() {
        let (mut claim, intake_row) = Claim::open(intake("CLM-105", dec!(50)), &agent()).unwrap();
        assert_eq!(intake_row.changed_by, "claim_processing_agent");
        assert_eq!(intake_row.role, "AI Agent");

        let row = claim
            .transition(
                ClaimStatus::Withdrawn,
                &Actor::new("jdoe", ActorRole::User),
                Some("Filed in error".to_string()),
                None,
            )
            .unwrap();
        assert_eq!(row.changed_by, "jdoe");
        assert_eq!(row.role, "User");
    }
}

// ============================================================================
// Status Matrix Tests
// ============================================================================

mod status_matrix_tests {
    use super::*;

    #[test]
    fn test_pending_reaches_all_other_statuses() {
        for target in [
            ClaimStatus::Approved,
            ClaimStatus::Denied,
            ClaimStatus::Withdrawn,
        ] {
            let (claim, _) = Claim::open(intake("CLM-110", dec!(10)), &agent()).unwrap();
            assert!(claim.can_transition_to(target), "Pending -> {target}");
        }
    }

    #[test]
    fn test_terminal_statuses_only_allow_withdrawal() {
        let (mut approved, _) = Claim::open(intake("CLM-111", dec!(10)), &agent()).unwrap();
        approved
            .transition(ClaimStatus::Approved, &agent(), None, Some(dec!(10)))
            .unwrap();

        assert!(approved.can_transition_to(ClaimStatus::Withdrawn));
        assert!(!approved.can_transition_to(ClaimStatus::Pending));
        assert!(!approved.can_transition_to(ClaimStatus::Denied));
    }

    #[test]
    fn test_withdrawn_allows_nothing() {
        let (mut claim, _) = Claim::open(intake("CLM-112", dec!(10)), &agent()).unwrap();
        claim
            .transition(ClaimStatus::Withdrawn, &agent(), None, None)
            .unwrap();

        for target in [
            ClaimStatus::Pending,
            ClaimStatus::Approved,
            ClaimStatus::Denied,
            ClaimStatus::Withdrawn,
        ] {
            assert!(!claim.can_transition_to(target), "Withdrawn -> {target}");
        }
    }

    #[test]
    fn test_status_serialization_round_trips() {
        for status in [
            ClaimStatus::Pending,
            ClaimStatus::Approved,
            ClaimStatus::Denied,
            ClaimStatus::Withdrawn,
        ] {
            assert_eq!(ClaimStatus::parse(status.as_str()), Some(status));
            let json = serde_json::to_string(&status).unwrap();
            let back: ClaimStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
        assert_eq!(ClaimStatus::parse("Escalated"), None);
    }

    #[test]
    fn test_history_status_covers_new() {
        assert_eq!(HistoryStatus::parse("New"), Some(HistoryStatus::New));
        for status in [
            ClaimStatus::Pending,
            ClaimStatus::Approved,
            ClaimStatus::Denied,
            ClaimStatus::Withdrawn,
        ] {
            let mapped = HistoryStatus::from(status);
            assert_eq!(mapped.as_str(), status.as_str());
        }
    }
}

// ============================================================================
// Guardrail Tests
// ============================================================================

mod guardrail_tests {
    use super::*;

    #[test]
    fn test_new_claims_start_clean() {
        let (claim, _) = Claim::open(intake("CLM-120", dec!(10)), &agent()).unwrap();
        assert_eq!(claim.guardrail_summary, GuardrailSummary::clean());
        assert!(!claim.guardrail_summary.hitl_flag);
    }

    #[test]
    fn test_fraud_statuses_require_review_except_clean() {
        assert!(!FraudStatus::NoFraud.requires_review());
        assert!(FraudStatus::Suspected.requires_review());
        assert!(FraudStatus::Confirmed.requires_review());
    }

    #[test]
    fn test_guardrail_summary_json_shape() {
        let summary = GuardrailSummary::fraud(FraudStatus::Suspected, "Mismatched provider ids");
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["fraud_status"], "Suspected");
        assert_eq!(json["hitl_flag"], true);
        assert_eq!(json["fraud_reason"], "Mismatched provider ids");
        // Unset drift fields stay off the wire
        assert!(json.get("drift_magnitude").is_none());
    }
}
