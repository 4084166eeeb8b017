//! API error handling
//!
//! Maps the domain error taxonomy onto HTTP statuses: validation errors are
//! 422, unknown entities 404, state-machine violations and double reviews
//! 409, and an exhausted monitoring feed 503. State-machine violations are
//! never coerced into a success.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_claims::ClaimError;
use domain_hitl::HitlError;
use domain_monitoring::MonitoringError;
use infra_db::{ClaimStoreError, DatabaseError, HitlStoreError};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                msg.clone(),
            ),
            ApiError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg.clone(),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
            ),
            ApiError::Database(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::ClaimNotFound(id) => ApiError::NotFound(format!("Claim not found: {id}")),
            ClaimError::DuplicateClaim(id) => {
                ApiError::Conflict(format!("Claim already exists: {id}"))
            }
            ClaimError::InvalidStatusTransition { .. } => ApiError::Conflict(err.to_string()),
            other => ApiError::Validation(other.to_string()),
        }
    }
}

impl From<HitlError> for ApiError {
    fn from(err: HitlError) -> Self {
        match err {
            HitlError::QueueEntryNotFound(id) => {
                ApiError::NotFound(format!("Queue entry not found: {id}"))
            }
            HitlError::AlreadyReviewed(_) => ApiError::Conflict(err.to_string()),
            HitlError::Claim(inner) => inner.into(),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::NotFound(msg),
            DatabaseError::DuplicateEntry(msg) => ApiError::Conflict(msg),
            other => ApiError::Database(other.to_string()),
        }
    }
}

impl From<ClaimStoreError> for ApiError {
    fn from(err: ClaimStoreError) -> Self {
        match err {
            ClaimStoreError::Domain(e) => e.into(),
            ClaimStoreError::Database(e) => e.into(),
        }
    }
}

impl From<HitlStoreError> for ApiError {
    fn from(err: HitlStoreError) -> Self {
        match err {
            HitlStoreError::Domain(e) => e.into(),
            HitlStoreError::Database(e) => e.into(),
        }
    }
}

impl From<MonitoringError> for ApiError {
    fn from(err: MonitoringError) -> Self {
        match &err {
            MonitoringError::NoRuns => ApiError::NotFound(err.to_string()),
            MonitoringError::InvalidRun { .. } => ApiError::Internal(err.to_string()),
            _ => ApiError::Unavailable(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ClaimId;

    #[test]
    fn test_invalid_transition_maps_to_conflict() {
        let err: ApiError = ClaimError::InvalidStatusTransition {
            from: "Denied".to_string(),
            to: "Approved".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err: ApiError = ClaimError::ClaimNotFound(ClaimId::new("CLM-404")).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_double_review_maps_to_conflict() {
        let err: ApiError = HitlError::AlreadyReviewed(ClaimId::new("CLM-1")).into();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn test_feed_outage_maps_to_unavailable() {
        let err: ApiError = MonitoringError::Unavailable("fs down".to_string()).into();
        assert!(matches!(err, ApiError::Unavailable(_)));
    }
}
