//! HTTP API Layer
//!
//! This crate provides the REST API for the claims reimbursement core using
//! Axum.
//!
//! # Architecture
//!
//! - **Handlers**: claims, HITL queue, monitoring feed, feedback, health
//! - **Middleware**: bearer-token authentication and audit logging
//! - **DTOs**: request/response data transfer objects with validation
//! - **Error Handling**: domain taxonomy mapped onto consistent HTTP codes
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, config::ApiConfig};
//!
//! let app = create_router(pool, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_monitoring::MonitoringFeed;

use crate::config::ApiConfig;
use crate::handlers::{claims, feedback, health, hitl, monitoring};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
    pub feed: MonitoringFeed,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `config` - API configuration
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    let feed = MonitoringFeed::new(&config.monitoring_dir);
    let state = AppState { pool, config, feed };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Claims routes
    let claims_routes = Router::new()
        .route("/", post(claims::create_claim))
        .route("/", get(claims::list_claims))
        .route("/statistics/overview", get(claims::statistics))
        .route("/:id", get(claims::get_claim))
        .route("/:id/status", put(claims::update_status))
        .route("/:id/history", get(claims::get_history));

    // HITL queue routes
    let hitl_routes = Router::new()
        .route("/queue", get(hitl::pending_queue))
        .route("/statistics/overview", get(hitl::statistics))
        .route("/claim/:claim_id", get(hitl::get_by_claim))
        .route("/:queue_id/assign", put(hitl::assign))
        .route("/:queue_id/review", post(hitl::submit_review));

    // Monitoring feed routes
    let monitoring_routes = Router::new()
        .route("/all", get(monitoring::all_runs))
        .route("/latest", get(monitoring::latest_run))
        .route("/history", get(monitoring::run_history));

    // Feedback routes
    let feedback_routes = Router::new()
        .route("/", post(feedback::create_feedback))
        .route("/", get(feedback::list_feedback));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .nest("/hitl", hitl_routes)
        .nest("/monitoring", monitoring_routes)
        .nest("/feedback", feedback_routes)
        .route("/metrics/latest", get(monitoring::latest_metrics))
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
