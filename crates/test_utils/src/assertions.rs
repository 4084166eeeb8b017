//! Custom Test Assertions
//!
//! Specialized assertion helpers for domain types that give more meaningful
//! error messages than standard assertions.

use domain_claims::{history::is_consistent_sequence, Claim, ClaimHistory, HistoryStatus};

/// Asserts that a claim's history trail is a valid chain ending at the
/// claim's current status
///
/// # Panics
///
/// Panics when the chain is broken, does not start from `New`, or its last
/// row disagrees with the claim
pub fn assert_history_consistent(claim: &Claim, history: &[ClaimHistory]) {
    assert!(
        is_consistent_sequence(history),
        "history for claim {} is not a consistent chain",
        claim.claim_id
    );

    let last = history
        .last()
        .unwrap_or_else(|| panic!("claim {} has no history", claim.claim_id));
    assert_eq!(
        last.new_status, claim.status,
        "last history row ({} -> {}) disagrees with claim status {}",
        last.old_status, last.new_status, claim.status
    );
}

/// Asserts that the first history row is the intake row
pub fn assert_intake_row(entry: &ClaimHistory) {
    assert_eq!(
        entry.old_status,
        HistoryStatus::New,
        "expected intake row starting from New, got {}",
        entry.old_status
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::TestClaimBuilder;
    use crate::fixtures::ActorFixtures;
    use domain_claims::ClaimStatus;

    #[test]
    fn test_consistent_history_passes() {
        let (mut claim, intake) = TestClaimBuilder::new().build();
        let denial = claim
            .transition(
                ClaimStatus::Denied,
                &ActorFixtures::reviewer(),
                Some("Not covered".to_string()),
                None,
            )
            .unwrap();

        assert_intake_row(&intake);
        assert_history_consistent(&claim, &[intake, denial]);
    }

    #[test]
    #[should_panic(expected = "disagrees with claim status")]
    fn test_stale_history_panics() {
        let (mut claim, intake) = TestClaimBuilder::new().build();
        claim
            .transition(ClaimStatus::Denied, &ActorFixtures::reviewer(), None, None)
            .unwrap();

        // Trail missing the denial row must fail the assertion
        assert_history_consistent(&claim, &[intake]);
    }
}
