//! Error types for the confirmation notifier.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use email_client::EmailError;
use serde::Serialize;
use thiserror::Error;

/// Notifier error types.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// The email provider refused the message; carries the provider's body.
    #[error("{0}")]
    Rejected(String),

    /// Anything else: unreadable request, transport failure, bad provider reply.
    #[error("{0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for NotifierError {
    fn into_response(self) -> Response {
        let status = match &self {
            NotifierError::Rejected(_) => StatusCode::BAD_REQUEST,
            NotifierError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<EmailError> for NotifierError {
    fn from(e: EmailError) -> Self {
        match e {
            EmailError::Rejected { body, .. } => NotifierError::Rejected(body),
            other => NotifierError::Internal(other.to_string()),
        }
    }
}

impl From<askama::Error> for NotifierError {
    fn from(e: askama::Error) -> Self {
        NotifierError::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for NotifierError {
    fn from(e: serde_json::Error) -> Self {
        NotifierError::Internal(e.to_string())
    }
}
