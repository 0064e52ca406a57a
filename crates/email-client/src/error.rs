//! Email client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status. `body` is the raw
    /// response text.
    #[error("Email provider rejected request: {status} - {body}")]
    Rejected { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
