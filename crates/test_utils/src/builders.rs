//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the relevant fields and take defaults for the rest.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Actor, ClaimId, CustomerId, PolicyId};
use domain_claims::{Claim, ClaimHistory, NewClaim};
use domain_hitl::HitlQueueEntry;

use crate::fixtures::{ActorFixtures, IdFixtures, TemporalFixtures};

/// Builder for opening test claims
pub struct TestClaimBuilder {
    claim_id: ClaimId,
    claim_name: Option<String>,
    customer_id: CustomerId,
    policy_id: Option<PolicyId>,
    claim_type: Option<String>,
    network_status: Option<String>,
    date_of_service: Option<DateTime<Utc>>,
    claim_amount: Decimal,
    ai_reasoning: Option<String>,
    actor: Actor,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            claim_id: IdFixtures::claim_id(),
            claim_name: Some("Outpatient visit".to_string()),
            customer_id: IdFixtures::customer_id(),
            policy_id: Some(IdFixtures::policy_id()),
            claim_type: Some("Outpatient".to_string()),
            network_status: Some(IdFixtures::drifted_segment().to_string()),
            date_of_service: Some(TemporalFixtures::service_date()),
            claim_amount: dec!(3250.00),
            ai_reasoning: None,
            actor: ActorFixtures::agent(),
        }
    }

    pub fn with_claim_id(mut self, id: impl Into<String>) -> Self {
        self.claim_id = ClaimId::new(id);
        self
    }

    pub fn with_customer_id(mut self, id: impl Into<String>) -> Self {
        self.customer_id = CustomerId::new(id);
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.claim_amount = amount;
        self
    }

    pub fn with_network_status(mut self, segment: impl Into<String>) -> Self {
        self.network_status = Some(segment.into());
        self
    }

    pub fn without_network_status(mut self) -> Self {
        self.network_status = None;
        self
    }

    pub fn with_claim_type(mut self, claim_type: impl Into<String>) -> Self {
        self.claim_type = Some(claim_type.into());
        self
    }

    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actor = actor;
        self
    }

    /// Opens the claim, returning it with its intake history row
    pub fn build(self) -> (Claim, ClaimHistory) {
        Claim::open(
            NewClaim {
                claim_id: self.claim_id,
                claim_name: self.claim_name,
                customer_id: self.customer_id,
                policy_id: self.policy_id,
                claim_type: self.claim_type,
                network_status: self.network_status,
                date_of_service: self.date_of_service,
                claim_amount: self.claim_amount,
                ai_reasoning: self.ai_reasoning,
            },
            &self.actor,
        )
        .expect("test claim should be valid")
    }

    /// Opens the claim, discarding the intake row
    pub fn build_claim(self) -> Claim {
        self.build().0
    }
}

/// Builder for review queue entries
pub struct TestQueueEntryBuilder {
    claim_id: ClaimId,
}

impl Default for TestQueueEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestQueueEntryBuilder {
    pub fn new() -> Self {
        Self {
            claim_id: IdFixtures::claim_id(),
        }
    }

    pub fn for_claim(mut self, id: impl Into<String>) -> Self {
        self.claim_id = ClaimId::new(id);
        self
    }

    pub fn build(self) -> HitlQueueEntry {
        HitlQueueEntry::open(self.claim_id)
    }
}
