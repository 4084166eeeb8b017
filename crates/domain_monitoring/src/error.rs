//! Monitoring domain errors

use thiserror::Error;

/// Errors that can occur loading or validating monitoring data
#[derive(Debug, Error)]
pub enum MonitoringError {
    /// The feed location could not be read; retryable
    #[error("Monitoring feed unavailable: {0}")]
    Unavailable(String),

    /// A read did not finish within the configured timeout; retryable
    #[error("Monitoring feed timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// A run file was present but malformed
    #[error("Invalid monitoring run {file}: {reason}")]
    InvalidRun { file: String, reason: String },

    /// No valid monitoring runs exist yet
    #[error("No monitoring runs available")]
    NoRuns,
}

impl MonitoringError {
    /// True when the caller should retry with backoff
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MonitoringError::Unavailable(_) | MonitoringError::Timeout { .. }
        )
    }
}
