//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities across the claims system.
//! Fixtures are consistent and predictable for unit tests.

use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeMap;

use core_kernel::{Actor, ActorRole, ClaimId, CustomerId, PolicyId};
use domain_monitoring::{evaluate, DriftConfig, DriftEvaluation, SegmentStats};

/// Fixture identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn claim_id() -> ClaimId {
        ClaimId::new("CLM-1")
    }

    pub fn customer_id() -> CustomerId {
        CustomerId::new("CUST-1001")
    }

    pub fn policy_id() -> PolicyId {
        PolicyId::new("POL-2024-001")
    }

    /// Segment used by the drifted fixtures
    pub fn drifted_segment() -> &'static str {
        "NET-07"
    }

    /// Segment untouched by the drifted fixtures
    pub fn quiet_segment() -> &'static str {
        "NET-01"
    }
}

/// Fixture actors
pub struct ActorFixtures;

impl ActorFixtures {
    pub fn agent() -> Actor {
        Actor::ai_agent()
    }

    pub fn reviewer() -> Actor {
        Actor::reviewer("mwilson")
    }

    pub fn dashboard_user() -> Actor {
        Actor::new("jdoe", ActorRole::User)
    }
}

/// Fixture timestamps
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard date of service (Jun 1, 2024)
    pub fn service_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
    }

    /// Monitoring window start used in run fixtures
    pub fn window_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }
}

/// Fixture drift inputs and evaluations
pub struct DriftFixtures;

impl DriftFixtures {
    /// Baseline denial rates for two segments
    pub fn baseline() -> BTreeMap<String, f64> {
        BTreeMap::from([
            (IdFixtures::drifted_segment().to_string(), 0.10),
            (IdFixtures::quiet_segment().to_string(), 0.12),
        ])
    }

    /// Window in which NET-07 drifted by 0.24 and NET-01 stayed put
    pub fn drifted_window() -> BTreeMap<String, SegmentStats> {
        BTreeMap::from([
            (
                IdFixtures::drifted_segment().to_string(),
                SegmentStats::new(34, 100),
            ),
            (
                IdFixtures::quiet_segment().to_string(),
                SegmentStats::new(13, 100),
            ),
        ])
    }

    /// Window with no meaningful movement anywhere
    pub fn quiet_window() -> BTreeMap<String, SegmentStats> {
        BTreeMap::from([
            (
                IdFixtures::drifted_segment().to_string(),
                SegmentStats::new(12, 100),
            ),
            (
                IdFixtures::quiet_segment().to_string(),
                SegmentStats::new(13, 100),
            ),
        ])
    }

    pub fn config() -> DriftConfig {
        DriftConfig::new(0.15)
    }

    /// Evaluation reporting warning-level drift on NET-07
    pub fn warning_evaluation() -> DriftEvaluation {
        evaluate(&Self::baseline(), &Self::drifted_window(), &Self::config())
    }

    /// Evaluation with nothing drifted
    pub fn quiet_evaluation() -> DriftEvaluation {
        evaluate(&Self::baseline(), &Self::quiet_window(), &Self::config())
    }
}
