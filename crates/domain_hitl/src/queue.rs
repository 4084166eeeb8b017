//! Review queue entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClaimId, QueueId, UserId};
use domain_claims::ClaimStatus;

use crate::error::HitlError;

/// Review entry status; mirrors the reviewer's decision once closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewStatus {
    Pending,
    Approved,
    Denied,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "Pending",
            ReviewStatus::Approved => "Approved",
            ReviewStatus::Denied => "Denied",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(ReviewStatus::Pending),
            "Approved" => Some(ReviewStatus::Approved),
            "Denied" => Some(ReviewStatus::Denied),
            _ => None,
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terminal decision a reviewer can make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewDecision {
    Approved,
    Denied,
}

impl ReviewDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewDecision::Approved => "Approved",
            ReviewDecision::Denied => "Denied",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Approved" => Some(ReviewDecision::Approved),
            "Denied" => Some(ReviewDecision::Denied),
            _ => None,
        }
    }

    /// Claim status the decision commits
    pub fn to_claim_status(self) -> ClaimStatus {
        match self {
            ReviewDecision::Approved => ClaimStatus::Approved,
            ReviewDecision::Denied => ClaimStatus::Denied,
        }
    }

    fn to_review_status(self) -> ReviewStatus {
        match self {
            ReviewDecision::Approved => ReviewStatus::Approved,
            ReviewDecision::Denied => ReviewStatus::Denied,
        }
    }
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One review queue entry
///
/// A claim has at most one open entry at a time; flagging an already-queued
/// claim is a no-op at the store layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitlQueueEntry {
    /// Database-assigned key, absent until persisted
    pub queue_id: Option<QueueId>,
    pub claim_id: ClaimId,
    /// Reviewer the entry is assigned to, if any
    pub assigned_to: Option<UserId>,
    pub status: ReviewStatus,
    pub reviewer_comments: Option<String>,
    pub decision: Option<ReviewDecision>,
    pub created_at: DateTime<Utc>,
    /// Set only when a terminal decision is recorded
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl HitlQueueEntry {
    /// Opens a new pending entry for a flagged claim
    pub fn open(claim_id: ClaimId) -> Self {
        Self {
            queue_id: None,
            claim_id,
            assigned_to: None,
            status: ReviewStatus::Pending,
            reviewer_comments: None,
            decision: None,
            created_at: Utc::now(),
            reviewed_at: None,
        }
    }

    /// True until a terminal decision closes the entry
    pub fn is_open(&self) -> bool {
        self.reviewed_at.is_none()
    }

    /// Assigns the entry to a reviewer
    pub fn assign(&mut self, reviewer: UserId) -> Result<(), HitlError> {
        if !self.is_open() {
            return Err(HitlError::AlreadyReviewed(self.claim_id.clone()));
        }
        self.assigned_to = Some(reviewer);
        Ok(())
    }

    /// Records the reviewer's terminal decision
    ///
    /// Fails with `AlreadyReviewed` when the entry is closed; a closed
    /// entry is immutable.
    pub fn close(
        &mut self,
        decision: ReviewDecision,
        comments: Option<String>,
    ) -> Result<(), HitlError> {
        if !self.is_open() {
            return Err(HitlError::AlreadyReviewed(self.claim_id.clone()));
        }
        self.status = decision.to_review_status();
        self.decision = Some(decision);
        self.reviewer_comments = comments;
        self.reviewed_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_entry_is_pending_and_open() {
        let entry = HitlQueueEntry::open(ClaimId::new("CLM-1"));
        assert!(entry.is_open());
        assert_eq!(entry.status, ReviewStatus::Pending);
        assert!(entry.decision.is_none());
        assert!(entry.reviewed_at.is_none());
    }

    #[test]
    fn test_close_records_decision_and_timestamp() {
        let mut entry = HitlQueueEntry::open(ClaimId::new("CLM-1"));
        entry
            .close(
                ReviewDecision::Denied,
                Some("Documentation inconsistent with policy".to_string()),
            )
            .unwrap();

        assert!(!entry.is_open());
        assert_eq!(entry.status, ReviewStatus::Denied);
        assert_eq!(entry.decision, Some(ReviewDecision::Denied));
        assert!(entry.reviewed_at.is_some());
    }

    #[test]
    fn test_double_review_is_rejected() {
        let mut entry = HitlQueueEntry::open(ClaimId::new("CLM-1"));
        entry.close(ReviewDecision::Approved, None).unwrap();

        let err = entry.close(ReviewDecision::Denied, None).unwrap_err();
        assert!(matches!(err, HitlError::AlreadyReviewed(_)));
        // First decision stands
        assert_eq!(entry.decision, Some(ReviewDecision::Approved));
    }

    #[test]
    fn test_assign_after_close_is_rejected() {
        let mut entry = HitlQueueEntry::open(ClaimId::new("CLM-1"));
        entry.close(ReviewDecision::Approved, None).unwrap();
        assert!(entry.assign(UserId::new(7)).is_err());
    }

    #[test]
    fn test_decision_maps_to_claim_status() {
        assert_eq!(
            ReviewDecision::Approved.to_claim_status(),
            ClaimStatus::Approved
        );
        assert_eq!(ReviewDecision::Denied.to_claim_status(), ClaimStatus::Denied);
    }
}
