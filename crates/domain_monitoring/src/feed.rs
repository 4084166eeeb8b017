//! Monitoring feed
//!
//! Loads `monitoring_*.json` run files from a directory, the handoff format
//! between the validation pipeline and this service. Reads are bounded by a
//! timeout and retried with backoff; a malformed run file is skipped with a
//! warning rather than failing the whole feed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::error::MonitoringError;
use crate::run::MonitoringRun;

/// Feed location and retry policy
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Directory holding `monitoring_*.json` files
    pub dir: PathBuf,
    /// Time limit for one full load of the directory
    pub read_timeout: Duration,
    /// Retries after a retryable failure
    pub max_retries: u32,
    /// Delay before the first retry, doubled each attempt
    pub retry_backoff: Duration,
}

impl FeedConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            read_timeout: Duration::from_secs(5),
            max_retries: 2,
            retry_backoff: Duration::from_millis(200),
        }
    }
}

/// Read-only access to monitoring runs
#[derive(Debug, Clone)]
pub struct MonitoringFeed {
    config: FeedConfig,
}

impl MonitoringFeed {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            config: FeedConfig::new(dir),
        }
    }

    pub fn with_config(config: FeedConfig) -> Self {
        Self { config }
    }

    /// Loads all valid runs, oldest first
    ///
    /// Retryable failures (directory unreadable, timeout) are retried with
    /// exponential backoff before surfacing.
    pub async fn load_all(&self) -> Result<Vec<MonitoringRun>, MonitoringError> {
        let mut backoff = self.config.retry_backoff;
        let mut attempt = 0;

        loop {
            let result = timeout(self.config.read_timeout, self.load_once())
                .await
                .map_err(|_| MonitoringError::Timeout {
                    timeout_ms: self.config.read_timeout.as_millis() as u64,
                })
                .and_then(|inner| inner);

            match result {
                Ok(runs) => return Ok(runs),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    warn!(%err, attempt, "monitoring feed read failed, retrying");
                    sleep(backoff).await;
                    backoff *= 2;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Loads the most recent run
    pub async fn latest(&self) -> Result<MonitoringRun, MonitoringError> {
        self.load_all()
            .await?
            .pop()
            .ok_or(MonitoringError::NoRuns)
    }

    /// Loads the most recent `limit` runs, oldest first
    pub async fn recent(&self, limit: usize) -> Result<Vec<MonitoringRun>, MonitoringError> {
        let mut runs = self.load_all().await?;
        if runs.len() > limit {
            runs.drain(..runs.len() - limit);
        }
        Ok(runs)
    }

    async fn load_once(&self) -> Result<Vec<MonitoringRun>, MonitoringError> {
        let mut entries = tokio::fs::read_dir(&self.config.dir)
            .await
            .map_err(|e| MonitoringError::Unavailable(format!("{}: {e}", self.config.dir.display())))?;

        let mut runs = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| MonitoringError::Unavailable(e.to_string()))?
        {
            let path = entry.path();
            if !is_run_file(&path) {
                continue;
            }
            match self.parse_run(&path).await {
                Ok(run) => {
                    debug!(file = %path.display(), run_id = %run.run_id, "loaded monitoring run");
                    runs.push(run);
                }
                Err(err) => {
                    warn!(file = %path.display(), %err, "skipping invalid monitoring run");
                }
            }
        }

        runs.sort_by_key(|run| run.started_at());
        info!(count = runs.len(), "monitoring feed loaded");
        Ok(runs)
    }

    async fn parse_run(&self, path: &Path) -> Result<MonitoringRun, MonitoringError> {
        let file = path.display().to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| MonitoringError::Unavailable(format!("{file}: {e}")))?;

        let run: MonitoringRun =
            serde_json::from_slice(&bytes).map_err(|e| MonitoringError::InvalidRun {
                file: file.clone(),
                reason: e.to_string(),
            })?;
        run.validate().map_err(|e| MonitoringError::InvalidRun {
            file,
            reason: e.to_string(),
        })?;
        Ok(run)
    }
}

fn is_run_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with("monitoring_") && n.ends_with(".json"))
        .unwrap_or(false)
}
