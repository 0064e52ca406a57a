//! Error types for the registration service.

use crate::validator::{Field, ValidationError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use registration_store::PersistenceError;
use serde::Serialize;
use thiserror::Error;

/// Message shown to users when a submission fails for reasons they can't fix.
pub const RETRY_LATER: &str = "Please try again later.";

/// Why a submission did not produce a stored registration.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl SubmissionError {
    /// Text suitable for showing to the person who submitted the form.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Validation(e) => e.message.clone(),
            SubmissionError::Persistence(_) => RETRY_LATER.to_string(),
        }
    }
}

/// Notifier call failures. Never surfaced to the submitter.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Notifier returned {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(ValidationError),

    /// Cause stays in the logs; users only see the retry message.
    #[error("Registration failed. Please try again later.")]
    Persistence(PersistenceError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Missing or invalid admin token")]
    Unauthorized,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Persistence(_) => (StatusCode::SERVICE_UNAVAILABLE, "PERSISTENCE_ERROR"),
            ApiError::InvalidBody(_) => (StatusCode::BAD_REQUEST, "INVALID_BODY"),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::RateLimitExceeded => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED"),
        };

        let field = match &self {
            ApiError::Validation(e) => Some(e.field),
            _ => None,
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            field,
        };

        (status, Json(body)).into_response()
    }
}

impl From<SubmissionError> for ApiError {
    fn from(e: SubmissionError) -> Self {
        match e {
            SubmissionError::Validation(e) => ApiError::Validation(e),
            SubmissionError::Persistence(e) => ApiError::Persistence(e),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(e: PersistenceError) -> Self {
        ApiError::Persistence(e)
    }
}
