//! Denial-rate drift evaluation
//!
//! Compares the current window's denial rate against a baseline, per feature
//! segment (e.g. provider network). A segment whose rate moved further than
//! the configured threshold is reported as drifted; the HITL gate uses that
//! set to force claims from drifted segments into human review.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Denial counts for one segment in the current window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentStats {
    /// Claims denied in the window
    pub denied: u64,
    /// Total claims observed in the window
    pub total: u64,
}

impl SegmentStats {
    pub fn new(denied: u64, total: u64) -> Self {
        Self { denied, total }
    }

    /// Denial rate in [0, 1]; zero for an empty segment
    pub fn denial_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.denied as f64 / self.total as f64
        }
    }
}

/// Evaluation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftConfig {
    /// Magnitude fraction above which a segment counts as drifted
    /// (0.15 = 15 percentage points)
    pub threshold: f64,
    /// Minimum window sample count for a segment to participate in the
    /// evaluation; sparse segments are excluded to avoid false alarms
    pub min_segment_samples: u64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            min_segment_samples: 30,
        }
    }
}

impl DriftConfig {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn min_segment_samples(mut self, floor: u64) -> Self {
        self.min_segment_samples = floor;
        self
    }
}

/// Alert severity band for a drift magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftSeverity {
    Info,
    Warning,
    Critical,
}

impl DriftSeverity {
    /// Classifies a magnitude against a threshold: above 2x the threshold is
    /// critical, above the threshold is a warning, anything else is info
    pub fn classify(magnitude: f64, threshold: f64) -> Self {
        if magnitude > 2.0 * threshold {
            DriftSeverity::Critical
        } else if magnitude > threshold {
            DriftSeverity::Warning
        } else {
            DriftSeverity::Info
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DriftSeverity::Info => "info",
            DriftSeverity::Warning => "warning",
            DriftSeverity::Critical => "critical",
        }
    }

    /// True when the severity is strong enough for the HITL gate to act on
    pub fn is_actionable(&self) -> bool {
        matches!(self, DriftSeverity::Warning | DriftSeverity::Critical)
    }
}

impl fmt::Display for DriftSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One segment whose denial rate moved beyond the threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftedFeature {
    /// Segment key (e.g. provider network id)
    pub feature: String,
    /// |current_rate - baseline_rate|
    pub magnitude: f64,
    pub baseline_rate: f64,
    pub current_rate: f64,
}

/// Result of evaluating one monitoring window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftEvaluation {
    pub has_drift: bool,
    /// Max per-segment magnitude across eligible segments
    pub drift_magnitude: f64,
    /// Fraction of window claims belonging to drifted segments
    pub drift_share: f64,
    /// Drifted segments, magnitude descending, ties by key
    pub drifted_features: Vec<DriftedFeature>,
    pub severity: DriftSeverity,
    /// Threshold the evaluation ran with
    pub threshold: f64,
}

impl DriftEvaluation {
    /// True when the given segment is implicated by this evaluation
    pub fn affects_segment(&self, segment: &str) -> bool {
        self.drifted_features.iter().any(|f| f.feature == segment)
    }
}

/// Evaluates the current window against the baseline
///
/// Pure and stateless: the same `(baseline, window, config)` always produces
/// the same evaluation. Segments missing a baseline rate or below the
/// sample floor are excluded from the whole evaluation, so the output never
/// implicates a segment the floor suppressed.
pub fn evaluate(
    baseline: &BTreeMap<String, f64>,
    window: &BTreeMap<String, SegmentStats>,
    config: &DriftConfig,
) -> DriftEvaluation {
    let mut drifted = Vec::new();
    let mut drift_magnitude: f64 = 0.0;
    let mut eligible_total: u64 = 0;
    let mut drifted_total: u64 = 0;

    for (feature, stats) in window {
        if stats.total < config.min_segment_samples {
            continue;
        }
        let Some(&baseline_rate) = baseline.get(feature) else {
            continue;
        };

        eligible_total += stats.total;
        let current_rate = stats.denial_rate();
        let magnitude = (current_rate - baseline_rate).abs();
        drift_magnitude = drift_magnitude.max(magnitude);

        if magnitude > config.threshold {
            drifted_total += stats.total;
            drifted.push(DriftedFeature {
                feature: feature.clone(),
                magnitude,
                baseline_rate,
                current_rate,
            });
        }
    }

    // Deterministic ordering for reproducible alerts
    drifted.sort_by(|a, b| {
        b.magnitude
            .partial_cmp(&a.magnitude)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.feature.cmp(&b.feature))
    });

    let drift_share = if eligible_total == 0 {
        0.0
    } else {
        drifted_total as f64 / eligible_total as f64
    };

    DriftEvaluation {
        has_drift: drift_magnitude > config.threshold,
        drift_magnitude,
        drift_share,
        drifted_features: drifted,
        severity: DriftSeverity::classify(drift_magnitude, config.threshold),
        threshold: config.threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    fn window(entries: &[(&str, u64, u64)]) -> BTreeMap<String, SegmentStats> {
        entries
            .iter()
            .map(|(k, denied, total)| (k.to_string(), SegmentStats::new(*denied, *total)))
            .collect()
    }

    #[test]
    fn test_magnitude_above_threshold_is_warning_not_critical() {
        // 0.24 exceeds 0.15 but not 2x0.15 = 0.30
        let eval = evaluate(
            &baseline(&[("NET-07", 0.10)]),
            &window(&[("NET-07", 34, 100)]),
            &DriftConfig::new(0.15),
        );

        assert!(eval.has_drift);
        assert!((eval.drift_magnitude - 0.24).abs() < 1e-9);
        assert_eq!(eval.severity, DriftSeverity::Warning);
    }

    #[test]
    fn test_magnitude_above_twice_threshold_is_critical() {
        let eval = evaluate(
            &baseline(&[("NET-07", 0.05)]),
            &window(&[("NET-07", 40, 100)]),
            &DriftConfig::new(0.15),
        );

        assert_eq!(eval.severity, DriftSeverity::Critical);
    }

    #[test]
    fn test_no_drift_below_threshold() {
        let eval = evaluate(
            &baseline(&[("NET-07", 0.10)]),
            &window(&[("NET-07", 20, 100)]),
            &DriftConfig::new(0.15),
        );

        assert!(!eval.has_drift);
        assert_eq!(eval.severity, DriftSeverity::Info);
        assert!(eval.drifted_features.is_empty());
        assert_eq!(eval.drift_share, 0.0);
    }

    #[test]
    fn test_boundary_magnitude_equal_to_threshold_is_not_drift() {
        // exactly at the threshold: has_drift requires strictly greater
        let eval = evaluate(
            &baseline(&[("NET-01", 0.0)]),
            &window(&[("NET-01", 15, 100)]),
            &DriftConfig::new(0.15),
        );
        assert!(!eval.has_drift);
    }

    #[test]
    fn test_sparse_segment_is_excluded_entirely() {
        // NET-99 drifted hard but has 5 samples, below the floor of 30
        let eval = evaluate(
            &baseline(&[("NET-07", 0.10), ("NET-99", 0.05)]),
            &window(&[("NET-07", 12, 100), ("NET-99", 5, 5)]),
            &DriftConfig::new(0.15),
        );

        assert!(!eval.has_drift);
        assert!(!eval.affects_segment("NET-99"));
        assert!(eval.drift_magnitude < 0.15);
    }

    #[test]
    fn test_sample_floor_is_configurable() {
        let config = DriftConfig::new(0.15).min_segment_samples(5);
        let eval = evaluate(
            &baseline(&[("NET-99", 0.05)]),
            &window(&[("NET-99", 5, 5)]),
            &config,
        );

        assert!(eval.has_drift);
        assert!(eval.affects_segment("NET-99"));
    }

    #[test]
    fn test_segment_without_baseline_is_skipped() {
        let eval = evaluate(
            &baseline(&[]),
            &window(&[("NET-07", 90, 100)]),
            &DriftConfig::default(),
        );
        assert!(!eval.has_drift);
        assert!(eval.drifted_features.is_empty());
    }

    #[test]
    fn test_drifted_features_ordered_by_magnitude_then_key() {
        let eval = evaluate(
            &baseline(&[("NET-A", 0.10), ("NET-B", 0.10), ("NET-C", 0.10)]),
            &window(&[
                // NET-A and NET-C tie at magnitude 0.30, NET-B at 0.40
                ("NET-A", 40, 100),
                ("NET-B", 50, 100),
                ("NET-C", 40, 100),
            ]),
            &DriftConfig::new(0.15),
        );

        let order: Vec<&str> = eval
            .drifted_features
            .iter()
            .map(|f| f.feature.as_str())
            .collect();
        assert_eq!(order, vec!["NET-B", "NET-A", "NET-C"]);
    }

    #[test]
    fn test_drift_share_counts_drifted_claims() {
        let eval = evaluate(
            &baseline(&[("NET-A", 0.10), ("NET-B", 0.10)]),
            &window(&[("NET-A", 40, 100), ("NET-B", 12, 300)]),
            &DriftConfig::new(0.15),
        );

        // NET-A drifted (magnitude 0.30): 100 of 400 eligible claims
        assert!(eval.affects_segment("NET-A"));
        assert!((eval.drift_share - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_empty_window() {
        let eval = evaluate(
            &baseline(&[("NET-A", 0.10)]),
            &BTreeMap::new(),
            &DriftConfig::default(),
        );
        assert!(!eval.has_drift);
        assert_eq!(eval.drift_magnitude, 0.0);
        assert_eq!(eval.drift_share, 0.0);
    }
}
