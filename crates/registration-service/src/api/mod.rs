//! HTTP API for registrations.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::{rate_limit_middleware, ClientLimiter, RateLimitState};
pub use types::*;

use crate::pipeline::RegistrationDesk;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Submission pipeline
    pub desk: Arc<RegistrationDesk>,
    /// Bearer token guarding the listing; without one the listing is refused
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(desk: RegistrationDesk, admin_token: Option<&str>) -> Self {
        Self {
            desk: Arc::new(desk),
            admin_token: admin_token.map(Arc::from),
        }
    }
}

/// Create the API router with the default submission limit.
pub fn create_router(state: AppState) -> Router {
    create_router_with_rate_limit(state, RateLimitState::new(10))
}

/// Create the API router; only submissions are throttled.
pub fn create_router_with_rate_limit(state: AppState, rate_limit: RateLimitState) -> Router {
    let submit = post(handlers::submit_registration).route_layer(
        axum_middleware::from_fn_with_state(rate_limit, rate_limit_middleware),
    );

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/v1/registrations",
            submit.get(handlers::list_registrations),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
