//! HTTP request handlers.

use super::types::{ConfirmationRequest, HealthResponse};
use super::AppState;
use crate::error::NotifierError;
use crate::template;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use email_client::OutgoingEmail;
use tracing::{info, warn};

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// CORS preflight: empty 200, headers are added by middleware.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Render and send the confirmation email, relaying the provider's reply.
pub async fn send_confirmation(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, NotifierError> {
    let request: ConfirmationRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Unreadable confirmation request");
        NotifierError::from(e)
    })?;

    let html = template::render(&request, &state.event)?;
    let email = OutgoingEmail::html(
        &*state.from,
        request.email.as_str(),
        template::subject(request.tickets, &state.event),
        html,
    );

    let reply = state.email.send(&email).await?;

    info!(
        tickets = request.tickets,
        amount = template::amount_due(request.tickets, &state.event),
        "Confirmation email sent"
    );

    Ok(Json(reply))
}
