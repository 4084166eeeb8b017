//! Property-Based Test Generators
//!
//! Proptest strategies and fake-data helpers for generating random test
//! data that maintains domain invariants.

use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_claims::ClaimStatus;
use domain_monitoring::SegmentStats;

/// Strategy for claim identifiers in the issued format
pub fn claim_id_strategy() -> impl Strategy<Value = String> {
    (2020u32..2030u32, 1u32..10_000_000u32).prop_map(|(year, n)| format!("CLM-{year}-{n:07}"))
}

/// Strategy for non-negative claim amounts with two decimal places
pub fn claim_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|minor| Decimal::new(minor, 2))
}

/// Strategy for any claim status
pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Denied),
        Just(ClaimStatus::Withdrawn),
    ]
}

/// Strategy for provider network segment keys
pub fn segment_key_strategy() -> impl Strategy<Value = String> {
    (1u32..100u32).prop_map(|n| format!("NET-{n:02}"))
}

/// Strategy for denial rates in [0, 1]
pub fn denial_rate_strategy() -> impl Strategy<Value = f64> {
    (0u32..=1000u32).prop_map(|n| n as f64 / 1000.0)
}

/// Strategy for segment window counts where denied <= total
pub fn segment_stats_strategy() -> impl Strategy<Value = SegmentStats> {
    (0u64..500u64, 0u64..500u64)
        .prop_map(|(denied, extra)| SegmentStats::new(denied, denied + extra))
}

/// A realistic random customer name
pub fn fake_customer_name() -> String {
    Name().fake()
}

/// A realistic random provider name for claim labels
pub fn fake_provider_name() -> String {
    CompanyName().fake()
}
