//! HTTP request handlers.

use super::types::{HealthResponse, RegistrationsResponse, SubmitResponse};
use super::AppState;
use crate::error::ApiError;
use crate::validator::RegistrationInput;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use tracing::{info, warn};

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Submit a registration.
pub async fn submit_registration(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationInput>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

    let submission = state.desk.submit(&input).await?;

    info!(
        id = %submission.registration.id,
        confirmation = ?submission.confirmation,
        "Registration accepted"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            registration: submission.registration,
            confirmation: submission.confirmation,
            message: "Check your email for confirmation and payment details.".to_string(),
        }),
    ))
}

/// List all registrations, newest first. Requires the admin bearer token;
/// with no token configured the listing is never served.
pub async fn list_registrations(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RegistrationsResponse>, ApiError> {
    let Some(expected) = state.admin_token.as_deref() else {
        warn!("Registration listing refused, no admin token configured");
        return Err(ApiError::Unauthorized);
    };

    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if presented != Some(expected) {
        warn!("Registration listing refused");
        return Err(ApiError::Unauthorized);
    }

    let registrations = state.desk.list().await?;
    let total = registrations.len();

    Ok(Json(RegistrationsResponse {
        registrations,
        total,
    }))
}
