//! Registration store errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store rejected credentials")]
    Unauthorized,

    #[error("Store error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store returned no row for insert")]
    EmptyResponse,
}
