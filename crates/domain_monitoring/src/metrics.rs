//! Typed monitoring metrics
//!
//! The monitoring feed carries string-keyed metric dictionaries. Known
//! metric names map onto a closed enum; anything else is preserved through
//! the `Unknown` fallback so newer pipeline versions can ship metrics this
//! build does not know yet.

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Known metric names, with a forward-compatibility fallback
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricName {
    Accuracy,
    Precision,
    Recall,
    F1Score,
    DenialRate,
    AutoApprovalRate,
    AvgProcessingSeconds,
    ClaimsProcessed,
    /// A metric this build does not recognize; the raw name is preserved
    Unknown(String),
}

impl MetricName {
    pub fn parse(s: &str) -> Self {
        match s {
            "accuracy" => MetricName::Accuracy,
            "precision" => MetricName::Precision,
            "recall" => MetricName::Recall,
            "f1_score" => MetricName::F1Score,
            "denial_rate" => MetricName::DenialRate,
            "auto_approval_rate" => MetricName::AutoApprovalRate,
            "avg_processing_seconds" => MetricName::AvgProcessingSeconds,
            "claims_processed" => MetricName::ClaimsProcessed,
            other => MetricName::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MetricName::Accuracy => "accuracy",
            MetricName::Precision => "precision",
            MetricName::Recall => "recall",
            MetricName::F1Score => "f1_score",
            MetricName::DenialRate => "denial_rate",
            MetricName::AutoApprovalRate => "auto_approval_rate",
            MetricName::AvgProcessingSeconds => "avg_processing_seconds",
            MetricName::ClaimsProcessed => "claims_processed",
            MetricName::Unknown(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, MetricName::Unknown(_))
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for MetricName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MetricName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NameVisitor;

        impl<'de> Visitor<'de> for NameVisitor {
            type Value = MetricName;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a metric name string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<MetricName, E> {
                Ok(MetricName::parse(value))
            }
        }

        deserializer.deserialize_str(NameVisitor)
    }
}

/// A metric value: numeric for rates/counts, text for labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }
}
