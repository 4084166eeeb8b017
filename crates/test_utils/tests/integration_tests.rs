//! Integration Tests
//!
//! Cross-domain scenarios exercising the claim lifecycle, drift evaluation,
//! and HITL gate working together.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_claims::{ClaimStatus, FraudStatus, HistoryStatus};
use domain_hitl::{GateInput, GateOutcome, HitlGate, ReviewDecision};
use domain_monitoring::{DriftReport, DriftSeverity};

use test_utils::{
    assert_history_consistent, assert_intake_row, ActorFixtures, DriftFixtures, TestClaimBuilder,
    TestQueueEntryBuilder,
};

mod claim_review_flow {
    use super::*;

    /// The full path of a drift-flagged claim: intake, drift detection,
    /// review queue, reviewer denial.
    #[test]
    fn test_drifted_claim_is_held_reviewed_and_denied() {
        // Intake: CLM-1 for 3250.00 in segment NET-07
        let (mut claim, intake) = TestClaimBuilder::new()
            .with_claim_id("CLM-1")
            .with_amount(dec!(3250.00))
            .with_network_status("NET-07")
            .build();
        assert_intake_row(&intake);
        assert_eq!(claim.status, ClaimStatus::Pending);

        // Monitoring window reports NET-07 drifting 0.24 over the 0.15
        // threshold
        let evaluation = DriftFixtures::warning_evaluation();
        assert!(evaluation.has_drift);
        assert_eq!(evaluation.severity, DriftSeverity::Warning);
        let report = DriftReport::from(&evaluation);

        // Gate holds the claim for review
        let outcome = HitlGate::new().assess(&GateInput {
            fraud_status: claim.guardrail_summary.fraud_status,
            fraud_reason: None,
            segment: claim.network_status.as_deref(),
            drift: &report,
        });
        let GateOutcome::Review(summary) = outcome else {
            panic!("expected the drifted segment to force review");
        };
        claim.set_guardrail_summary(summary);
        assert!(claim.guardrail_summary.hitl_flag);
        assert!(claim.guardrail_summary.drift_detected);

        // Queue entry opens, claim stays Pending
        let mut entry = TestQueueEntryBuilder::new().for_claim("CLM-1").build();
        assert!(entry.is_open());
        assert_eq!(claim.status, ClaimStatus::Pending);

        // Reviewer denies with a comment
        let comment = "Denial-rate drift confirmed; documentation does not support the claim";
        entry
            .close(ReviewDecision::Denied, Some(comment.to_string()))
            .unwrap();
        let denial = claim
            .transition(
                ReviewDecision::Denied.to_claim_status(),
                &ActorFixtures::reviewer(),
                entry.reviewer_comments.clone(),
                None,
            )
            .unwrap();

        // Final state: claim denied, nothing approved, trail consistent
        assert_eq!(claim.status, ClaimStatus::Denied);
        assert_eq!(claim.approved_amount, Decimal::ZERO);
        assert_eq!(denial.old_status, HistoryStatus::Pending);
        assert_eq!(denial.new_status, ClaimStatus::Denied);
        assert_eq!(denial.change_reason.as_deref(), Some(comment));
        assert!(entry.reviewed_at.is_some());
        assert_eq!(entry.decision, Some(ReviewDecision::Denied));
        assert_history_consistent(&claim, &[intake, denial]);
    }

    /// A clean claim in a quiet segment commits its decision directly.
    #[test]
    fn test_clean_claim_is_not_held() {
        let (mut claim, intake) = TestClaimBuilder::new().with_amount(dec!(180.00)).build();

        let report = DriftReport::from(&DriftFixtures::quiet_evaluation());
        let outcome = HitlGate::new().assess(&GateInput {
            fraud_status: FraudStatus::NoFraud,
            fraud_reason: None,
            segment: claim.network_status.as_deref(),
            drift: &report,
        });
        assert_eq!(outcome, GateOutcome::Commit);

        let approval = claim
            .transition(
                ClaimStatus::Approved,
                &ActorFixtures::agent(),
                Some("Within policy limits".to_string()),
                Some(dec!(180.00)),
            )
            .unwrap();

        assert_eq!(claim.status, ClaimStatus::Approved);
        assert_eq!(claim.approved_amount, dec!(180.00));
        assert_history_consistent(&claim, &[intake, approval]);
    }

    /// Drift elsewhere never implicates a claim in an unaffected segment.
    #[test]
    fn test_drift_in_other_segment_does_not_hold_claim() {
        let (claim, _) = TestClaimBuilder::new()
            .with_network_status("NET-01")
            .build();

        let report = DriftReport::from(&DriftFixtures::warning_evaluation());
        let outcome = HitlGate::new().assess(&GateInput {
            fraud_status: FraudStatus::NoFraud,
            fraud_reason: None,
            segment: claim.network_status.as_deref(),
            drift: &report,
        });

        assert_eq!(outcome, GateOutcome::Commit);
    }

    /// A flagged claim with an open entry is not queued twice.
    #[test]
    fn test_reflagging_open_entry_is_a_noop() {
        let entry = TestQueueEntryBuilder::new().for_claim("CLM-1").build();
        assert!(entry.is_open());

        // The store layer skips creation when an open entry exists; at the
        // domain level the open entry is the idempotence witness
        let reflag = entry.is_open();
        assert!(reflag, "open entry must suppress a second queue insert");
    }

    /// A second decision on a closed entry is rejected and changes nothing.
    #[test]
    fn test_double_review_is_rejected() {
        let mut entry = TestQueueEntryBuilder::new().build();
        entry
            .close(ReviewDecision::Approved, Some("Looks fine".to_string()))
            .unwrap();
        let reviewed_at = entry.reviewed_at;

        assert!(entry.close(ReviewDecision::Denied, None).is_err());
        assert_eq!(entry.decision, Some(ReviewDecision::Approved));
        assert_eq!(entry.reviewed_at, reviewed_at);
    }
}

mod terminal_state_rules {
    use super::*;

    #[test]
    fn test_denied_claim_cannot_be_reopened() {
        let (mut claim, _) = TestClaimBuilder::new().build();
        claim
            .transition(ClaimStatus::Denied, &ActorFixtures::reviewer(), None, None)
            .unwrap();

        assert!(claim
            .transition(ClaimStatus::Pending, &ActorFixtures::agent(), None, None)
            .is_err());
        assert!(claim
            .transition(
                ClaimStatus::Approved,
                &ActorFixtures::agent(),
                None,
                Some(dec!(1))
            )
            .is_err());
    }

    #[test]
    fn test_withdrawal_is_allowed_from_terminal_decision() {
        let (mut claim, intake) = TestClaimBuilder::new().build();
        let approval = claim
            .transition(
                ClaimStatus::Approved,
                &ActorFixtures::reviewer(),
                None,
                Some(dec!(3250.00)),
            )
            .unwrap();
        let withdrawal = claim
            .transition(
                ClaimStatus::Withdrawn,
                &ActorFixtures::dashboard_user(),
                Some("Customer withdrew the claim".to_string()),
                None,
            )
            .unwrap();

        assert_eq!(claim.status, ClaimStatus::Withdrawn);
        assert_history_consistent(&claim, &[intake, approval, withdrawal]);
    }

    #[test]
    fn test_approval_boundary_amounts() {
        let (mut claim, _) = TestClaimBuilder::new().with_amount(dec!(1000.00)).build();

        // Over-approval is rejected and leaves the claim untouched
        assert!(claim
            .transition(
                ClaimStatus::Approved,
                &ActorFixtures::reviewer(),
                None,
                Some(dec!(1000.01)),
            )
            .is_err());
        assert_eq!(claim.status, ClaimStatus::Pending);

        // Equality is accepted
        claim
            .transition(
                ClaimStatus::Approved,
                &ActorFixtures::reviewer(),
                None,
                Some(dec!(1000.00)),
            )
            .unwrap();
        assert_eq!(claim.approved_amount, dec!(1000.00));
    }
}
