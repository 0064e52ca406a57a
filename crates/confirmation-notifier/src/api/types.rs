//! API request and response types.

use serde::{Deserialize, Serialize};

/// Registration details posted by the registration service after insert.
///
/// Values are trusted as sent; they are not re-validated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    pub name: String,
    pub email: String,
    pub city: String,
    pub tickets: u32,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}
