//! Monitoring Domain
//!
//! This crate decides whether live claim-processing behavior has drifted from
//! its baseline, and models the monitoring runs the dashboard charts are
//! built from.
//!
//! The drift evaluation itself is a pure function: identical inputs always
//! yield an identical result, so it can be re-run safely on every monitoring
//! window and called concurrently with claim processing. Everything stateful
//! (reading run files, retries, timeouts) lives at the feed boundary.

pub mod drift;
pub mod error;
pub mod feed;
pub mod metrics;
pub mod run;

pub use drift::{
    evaluate, DriftConfig, DriftEvaluation, DriftSeverity, DriftedFeature, SegmentStats,
};
pub use error::MonitoringError;
pub use feed::{FeedConfig, MonitoringFeed};
pub use metrics::{MetricName, MetricValue};
pub use run::{Alert, DriftReport, MonitoringRun, MonitoringWindow};
