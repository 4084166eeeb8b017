//! Monitoring DTOs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use domain_monitoring::{MetricName, MetricValue, MonitoringRun};

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MonitoringRunsResponse {
    pub runs: Vec<MonitoringRun>,
    pub count: usize,
}

impl MonitoringRunsResponse {
    pub fn new(runs: Vec<MonitoringRun>) -> Self {
        Self {
            count: runs.len(),
            runs,
        }
    }
}

/// Metrics of the most recent run
#[derive(Debug, Serialize)]
pub struct LatestMetricsResponse {
    pub run_id: String,
    pub metrics: BTreeMap<MetricName, MetricValue>,
}

impl From<MonitoringRun> for LatestMetricsResponse {
    fn from(run: MonitoringRun) -> Self {
        Self {
            run_id: run.run_id,
            metrics: run.metrics,
        }
    }
}
