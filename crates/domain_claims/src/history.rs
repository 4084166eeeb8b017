//! Claim history trail
//!
//! Every status change appends one row; rows are never mutated or deleted.
//! Ordered by timestamp, the rows for a claim form the exact transition
//! sequence the claim underwent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Actor, ClaimId, HistoryId};

use crate::claim::ClaimStatus;

/// Status recorded as the source of a transition
///
/// `New` only ever appears on the intake row written when a claim is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryStatus {
    New,
    Pending,
    Approved,
    Denied,
    Withdrawn,
}

impl HistoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryStatus::New => "New",
            HistoryStatus::Pending => "Pending",
            HistoryStatus::Approved => "Approved",
            HistoryStatus::Denied => "Denied",
            HistoryStatus::Withdrawn => "Withdrawn",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "New" => Some(HistoryStatus::New),
            "Pending" => Some(HistoryStatus::Pending),
            "Approved" => Some(HistoryStatus::Approved),
            "Denied" => Some(HistoryStatus::Denied),
            "Withdrawn" => Some(HistoryStatus::Withdrawn),
            _ => None,
        }
    }
}

impl From<ClaimStatus> for HistoryStatus {
    fn from(status: ClaimStatus) -> Self {
        match status {
            ClaimStatus::Pending => HistoryStatus::Pending,
            ClaimStatus::Approved => HistoryStatus::Approved,
            ClaimStatus::Denied => HistoryStatus::Denied,
            ClaimStatus::Withdrawn => HistoryStatus::Withdrawn,
        }
    }
}

impl fmt::Display for HistoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recorded status transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimHistory {
    /// Database-assigned key, absent until persisted
    pub history_id: Option<HistoryId>,
    pub claim_id: ClaimId,
    pub old_status: HistoryStatus,
    pub new_status: ClaimStatus,
    /// Actor name that performed the change
    pub changed_by: String,
    /// Actor kind ("AI Agent" or the human's role)
    pub role: String,
    pub change_reason: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ClaimHistory {
    /// Records a transition performed by the given actor
    pub fn record(
        claim_id: ClaimId,
        old_status: HistoryStatus,
        new_status: ClaimStatus,
        actor: &Actor,
        change_reason: Option<String>,
    ) -> Self {
        Self {
            history_id: None,
            claim_id,
            old_status,
            new_status,
            changed_by: actor.name.clone(),
            role: actor.role.as_str().to_string(),
            change_reason,
            timestamp: Utc::now(),
        }
    }
}

/// Checks that a history slice, in timestamp order, forms a valid chain:
/// the first row starts from `New` and each row's `old_status` equals the
/// previous row's `new_status`.
pub fn is_consistent_sequence(history: &[ClaimHistory]) -> bool {
    let Some(first) = history.first() else {
        return true;
    };
    if first.old_status != HistoryStatus::New {
        return false;
    }
    history.windows(2).all(|pair| {
        pair[1].old_status == HistoryStatus::from(pair[0].new_status)
            && pair[1].timestamp >= pair[0].timestamp
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ActorRole;

    fn entry(old: HistoryStatus, new: ClaimStatus) -> ClaimHistory {
        ClaimHistory::record(
            ClaimId::new("CLM-1"),
            old,
            new,
            &Actor::new("tester", ActorRole::User),
            None,
        )
    }

    #[test]
    fn test_intake_chain_is_consistent() {
        let history = vec![
            entry(HistoryStatus::New, ClaimStatus::Pending),
            entry(HistoryStatus::Pending, ClaimStatus::Denied),
        ];
        assert!(is_consistent_sequence(&history));
    }

    #[test]
    fn test_broken_chain_is_rejected() {
        let history = vec![
            entry(HistoryStatus::New, ClaimStatus::Pending),
            entry(HistoryStatus::Approved, ClaimStatus::Denied),
        ];
        assert!(!is_consistent_sequence(&history));
    }

    #[test]
    fn test_chain_must_start_from_new() {
        let history = vec![entry(HistoryStatus::Pending, ClaimStatus::Approved)];
        assert!(!is_consistent_sequence(&history));
    }

    #[test]
    fn test_empty_history_is_consistent() {
        assert!(is_consistent_sequence(&[]));
    }
}
