//! HTTP API Layer
//!
//! This crate exposes the transport claims workflow over HTTP using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Login, role switching, dashboards, claims and reviews
//! - **Middleware**: Session token check and audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! The claim store lives in memory for the lifetime of the process. All
//! handlers share it through [`AppState`] behind a read/write lock.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(config)?;
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::CoreError;
use domain_claims::{ClaimStore, SubmissionRules};
use domain_session::UserDirectory;

use crate::config::ApiConfig;
use crate::handlers::{claims, health, login, session};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<ClaimStore>>,
    pub directory: Arc<UserDirectory>,
    pub rules: SubmissionRules,
    pub config: ApiConfig,
}

impl AppState {
    /// Builds the state for a configuration, starting with an empty store
    pub fn new(config: ApiConfig) -> Result<Self, CoreError> {
        let rules = config.submission_rules()?;
        config.token_lifetime()?;
        let directory = config.directory();

        Ok(Self {
            store: Arc::new(RwLock::new(ClaimStore::new())),
            directory: Arc::new(directory),
            rules,
            config,
        })
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared store, directory and configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/auth/login", post(login::login));

    // Claims routes
    let claims_routes = Router::new()
        .route("/", post(claims::submit_claim))
        .route("/", get(claims::list_claims))
        .route("/preview", post(claims::preview))
        .route("/mine", get(claims::my_claims))
        .route("/pending", get(claims::pending_claims))
        .route("/:id", get(claims::get_claim))
        .route("/:id/approve", post(claims::approve_claim))
        .route("/:id/reject", post(claims::reject_claim));

    // Protected API routes
    let api_routes = Router::new()
        .route("/session/role", post(session::switch_role))
        .route("/dashboard", get(session::dashboard))
        .nest("/claims", claims_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
