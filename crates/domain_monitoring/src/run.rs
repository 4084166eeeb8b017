//! Monitoring run wire model
//!
//! One run file is produced per monitoring window by the validation
//! pipeline; the dashboard charts and the HITL gate both consume it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::drift::{DriftEvaluation, DriftSeverity};
use crate::error::MonitoringError;
use crate::metrics::{MetricName, MetricValue};

/// Time span a run covers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringWindow {
    /// Window start; older producers wrote this field as `timestamp`
    #[serde(alias = "timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

/// Drift block of a monitoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub drift_magnitude: f64,
    pub threshold: f64,
    pub has_drift: bool,
    #[serde(default)]
    pub drift_share: f64,
    #[serde(default)]
    pub drifted_features: Vec<String>,
    pub severity: DriftSeverity,
}

impl DriftReport {
    /// A report with no drift signal, used when no evaluation is available
    pub fn quiet(threshold: f64) -> Self {
        Self {
            drift_magnitude: 0.0,
            threshold,
            has_drift: false,
            drift_share: 0.0,
            drifted_features: Vec::new(),
            severity: DriftSeverity::Info,
        }
    }
}

impl From<&DriftEvaluation> for DriftReport {
    fn from(eval: &DriftEvaluation) -> Self {
        Self {
            drift_magnitude: eval.drift_magnitude,
            threshold: eval.threshold,
            has_drift: eval.has_drift,
            drift_share: eval.drift_share,
            drifted_features: eval
                .drifted_features
                .iter()
                .map(|f| f.feature.clone())
                .collect(),
            severity: eval.severity,
        }
    }
}

/// One alert raised by a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub alert_type: String,
    pub severity: DriftSeverity,
    pub message: String,
}

/// A complete monitoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringRun {
    pub run_id: String,
    pub monitoring_window: MonitoringWindow,
    pub metrics: BTreeMap<MetricName, MetricValue>,
    pub drift: DriftReport,
    #[serde(default)]
    pub data_quality: BTreeMap<String, MetricValue>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    pub status: String,
}

impl MonitoringRun {
    /// Timestamp used for chronological ordering
    pub fn started_at(&self) -> DateTime<Utc> {
        self.monitoring_window.start_time
    }

    /// Semantic checks beyond what deserialization enforces
    pub fn validate(&self) -> Result<(), MonitoringError> {
        if self.run_id.is_empty() {
            return Err(MonitoringError::InvalidRun {
                file: String::new(),
                reason: "run_id must not be empty".to_string(),
            });
        }
        if self.drift.threshold <= 0.0 {
            return Err(MonitoringError::InvalidRun {
                file: String::new(),
                reason: format!("non-positive drift threshold {}", self.drift.threshold),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUN_JSON: &str = r#"{
        "run_id": "run-2024-06-01T00",
        "monitoring_window": {"start_time": "2024-06-01T00:00:00Z", "end_time": "2024-06-01T06:00:00Z"},
        "metrics": {"accuracy": 0.94, "denial_rate": 0.21},
        "drift": {
            "drift_magnitude": 0.24,
            "threshold": 0.15,
            "has_drift": true,
            "drift_share": 0.18,
            "drifted_features": ["NET-07"],
            "severity": "warning"
        },
        "data_quality": {"completeness": 0.99},
        "alerts": [{"type": "drift", "severity": "warning", "message": "denial rate drift on NET-07"}],
        "status": "completed"
    }"#;

    #[test]
    fn test_run_deserializes() {
        let run: MonitoringRun = serde_json::from_str(RUN_JSON).unwrap();
        assert_eq!(run.run_id, "run-2024-06-01T00");
        assert!(run.drift.has_drift);
        assert_eq!(run.drift.severity, DriftSeverity::Warning);
        assert_eq!(run.alerts.len(), 1);
        assert_eq!(run.alerts[0].alert_type, "drift");
        run.validate().unwrap();
    }

    #[test]
    fn test_window_accepts_legacy_timestamp_field() {
        let json = r#"{"timestamp": "2024-06-01T00:00:00Z"}"#;
        let window: MonitoringWindow = serde_json::from_str(json).unwrap();
        assert!(window.end_time.is_none());
    }

    #[test]
    fn test_run_missing_drift_block_is_rejected() {
        let json = r#"{
            "run_id": "r1",
            "monitoring_window": {"start_time": "2024-06-01T00:00:00Z"},
            "metrics": {},
            "status": "completed"
        }"#;
        assert!(serde_json::from_str::<MonitoringRun>(json).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let mut run: MonitoringRun = serde_json::from_str(RUN_JSON).unwrap();
        run.drift.threshold = 0.0;
        assert!(run.validate().is_err());
    }

    #[test]
    fn test_report_from_evaluation() {
        use crate::drift::{evaluate, DriftConfig, SegmentStats};
        use std::collections::BTreeMap;

        let baseline = BTreeMap::from([("NET-07".to_string(), 0.10)]);
        let window = BTreeMap::from([("NET-07".to_string(), SegmentStats::new(34, 100))]);
        let eval = evaluate(&baseline, &window, &DriftConfig::new(0.15));

        let report = DriftReport::from(&eval);
        assert!(report.has_drift);
        assert_eq!(report.drifted_features, vec!["NET-07".to_string()]);
        assert_eq!(report.severity, DriftSeverity::Warning);
    }
}
