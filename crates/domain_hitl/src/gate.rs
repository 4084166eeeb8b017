//! Review gate decision rule

use tracing::debug;

use domain_claims::{FraudStatus, GuardrailSummary};
use domain_monitoring::DriftReport;

/// Signals the gate evaluates for one claim
#[derive(Debug, Clone)]
pub struct GateInput<'a> {
    /// Fraud screening outcome for the claim
    pub fraud_status: FraudStatus,
    /// Explanation attached to a non-clean fraud status
    pub fraud_reason: Option<&'a str>,
    /// The claim's feature segment (provider network)
    pub segment: Option<&'a str>,
    /// Drift report of the latest monitoring window
    pub drift: &'a DriftReport,
}

/// Gate verdict for one proposed decision
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// Human review required; carries the guardrail summary to persist
    Review(GuardrailSummary),
    /// No intervention; the proposed status may be committed directly
    Commit,
}

impl GateOutcome {
    pub fn requires_review(&self) -> bool {
        matches!(self, GateOutcome::Review(_))
    }
}

/// The review gate
///
/// Evaluated once per claim per incoming status proposal:
/// 1. any fraud signal forces review;
/// 2. otherwise, membership of the claim's segment in the drifted feature
///    set at warning or critical severity forces review;
/// 3. otherwise the decision commits.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitlGate;

impl HitlGate {
    pub fn new() -> Self {
        Self
    }

    pub fn assess(&self, input: &GateInput<'_>) -> GateOutcome {
        if input.fraud_status.requires_review() {
            let reason = input
                .fraud_reason
                .map(str::to_string)
                .unwrap_or_else(|| format!("Fraud screening returned {}", input.fraud_status));
            debug!(fraud_status = %input.fraud_status, "gate flagged claim on fraud signal");
            return GateOutcome::Review(GuardrailSummary::fraud(input.fraud_status, reason));
        }

        if let Some(segment) = input.segment {
            let drifted = input.drift.severity.is_actionable()
                && input.drift.drifted_features.iter().any(|f| f == segment);
            if drifted {
                let reason = format!(
                    "Denial-rate drift {:.2} exceeds threshold {:.2} for segment {} ({})",
                    input.drift.drift_magnitude,
                    input.drift.threshold,
                    segment,
                    input.drift.severity,
                );
                debug!(%segment, magnitude = input.drift.drift_magnitude, "gate flagged claim on drift signal");
                return GateOutcome::Review(GuardrailSummary::drift(
                    reason,
                    input.drift.drift_magnitude,
                    vec![segment.to_string()],
                ));
            }
        }

        GateOutcome::Commit
    }
}
