//! Guardrail validation summary
//!
//! The summary the automated pipeline attaches to each claim. The original
//! dashboard stored this as a loose JSON blob; here it is a closed structure
//! so the HITL gate invariants can be checked against typed fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fraud screening outcome for a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FraudStatus {
    /// No fraud indicators found
    #[default]
    #[serde(rename = "No Fraud")]
    NoFraud,
    /// Indicators present, unconfirmed
    Suspected,
    /// Fraud confirmed
    Confirmed,
}

impl FraudStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FraudStatus::NoFraud => "No Fraud",
            FraudStatus::Suspected => "Suspected",
            FraudStatus::Confirmed => "Confirmed",
        }
    }

    /// True when the fraud rule alone forces human review
    pub fn requires_review(&self) -> bool {
        !matches!(self, FraudStatus::NoFraud)
    }
}

impl fmt::Display for FraudStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured guardrail summary persisted with each claim
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GuardrailSummary {
    /// Fraud screening outcome
    #[serde(default)]
    pub fraud_status: FraudStatus,
    /// Whether the claim was routed to human review
    #[serde(default)]
    pub hitl_flag: bool,
    /// Explanation for the review flag (fraud finding or drift rationale)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraud_reason: Option<String>,
    /// Whether segment drift was detected for this claim's segment
    #[serde(default)]
    pub drift_detected: bool,
    /// Magnitude of the detected drift, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift_magnitude: Option<f64>,
    /// Feature segments whose drift implicated this claim
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_features: Vec<String>,
}

impl GuardrailSummary {
    /// Summary for a claim that passed all guardrails
    pub fn clean() -> Self {
        Self::default()
    }

    /// Summary for a claim flagged by the fraud rule
    pub fn fraud(status: FraudStatus, reason: impl Into<String>) -> Self {
        Self {
            fraud_status: status,
            hitl_flag: true,
            fraud_reason: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Summary for a claim flagged by the drift rule
    pub fn drift(reason: impl Into<String>, magnitude: f64, features: Vec<String>) -> Self {
        Self {
            hitl_flag: true,
            fraud_reason: Some(reason.into()),
            drift_detected: true,
            drift_magnitude: Some(magnitude),
            affected_features: features,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraud_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&FraudStatus::NoFraud).unwrap(),
            "\"No Fraud\""
        );
        assert_eq!(
            serde_json::from_str::<FraudStatus>("\"Suspected\"").unwrap(),
            FraudStatus::Suspected
        );
    }

    #[test]
    fn test_clean_summary_defaults() {
        let summary = GuardrailSummary::clean();
        assert_eq!(summary.fraud_status, FraudStatus::NoFraud);
        assert!(!summary.hitl_flag);
        assert!(!summary.drift_detected);
        assert!(summary.fraud_reason.is_none());
    }

    #[test]
    fn test_summary_deserializes_from_sparse_json() {
        // Rows written before drift fields existed carry only a subset
        let summary: GuardrailSummary =
            serde_json::from_str(r#"{"fraud_status": "No Fraud", "hitl_flag": false}"#).unwrap();
        assert!(!summary.drift_detected);
        assert!(summary.affected_features.is_empty());
    }

    #[test]
    fn test_drift_summary() {
        let summary = GuardrailSummary::drift(
            "denial rate drift 0.24 over threshold 0.15 for NET-07",
            0.24,
            vec!["NET-07".to_string()],
        );
        assert!(summary.hitl_flag);
        assert!(summary.drift_detected);
        assert_eq!(summary.drift_magnitude, Some(0.24));
        assert_eq!(summary.fraud_status, FraudStatus::NoFraud);
    }
}
