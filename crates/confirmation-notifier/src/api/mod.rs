//! HTTP API for the confirmation notifier.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::{cors_headers_middleware, ALLOWED_HEADERS};
pub use types::*;

use crate::config::EventDetails;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use email_client::EmailClient;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Email provider client
    pub email: Arc<EmailClient>,
    /// Event details rendered into every confirmation
    pub event: Arc<EventDetails>,
    /// Sender address
    pub from: Arc<str>,
}

impl AppState {
    /// Create new application state.
    pub fn new(email: EmailClient, event: EventDetails, from: impl Into<String>) -> Self {
        let from: String = from.into();
        Self {
            email: Arc::new(email),
            event: Arc::new(event),
            from: Arc::from(from),
        }
    }
}

/// Create the notifier router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::send_confirmation).options(handlers::preflight))
        .route("/health", get(handlers::health))
        .layer(axum_middleware::from_fn(cors_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
