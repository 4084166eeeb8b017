//! Tests for strongly-typed identifiers

use core_kernel::{ClaimId, CustomerId, HistoryId, PolicyId, QueueId, UserId};

#[test]
fn test_string_ids_preserve_their_value() {
    let claim = ClaimId::new("CLM-2024-0001");
    let customer = CustomerId::new("CUST-17");
    let policy = PolicyId::new("POL-9");

    assert_eq!(claim.as_str(), "CLM-2024-0001");
    assert_eq!(customer.to_string(), "CUST-17");
    assert_eq!(policy.as_ref(), "POL-9");
}

#[test]
fn test_string_id_conversions() {
    let id: ClaimId = "CLM-5".into();
    let raw: String = id.clone().into();
    assert_eq!(raw, "CLM-5");
    assert_eq!(ClaimId::from(raw), id);
}

#[test]
fn test_int_ids_wrap_database_keys() {
    assert_eq!(QueueId::new(3).value(), 3);
    assert_eq!(HistoryId::from(9i64).value(), 9);
    assert_eq!(i64::from(UserId::new(12)), 12);
}

#[test]
fn test_ids_are_ordered_and_hashable() {
    use std::collections::BTreeSet;

    let mut set = BTreeSet::new();
    set.insert(ClaimId::new("CLM-2"));
    set.insert(ClaimId::new("CLM-1"));
    set.insert(ClaimId::new("CLM-2"));

    let ordered: Vec<&str> = set.iter().map(|id| id.as_str()).collect();
    assert_eq!(ordered, vec!["CLM-1", "CLM-2"]);
}

#[test]
fn test_serde_is_transparent() {
    let id = QueueId::new(42);
    assert_eq!(serde_json::to_string(&id).unwrap(), "42");

    let claim: ClaimId = serde_json::from_str("\"CLM-7\"").unwrap();
    assert_eq!(claim.as_str(), "CLM-7");
}
