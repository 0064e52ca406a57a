//! API request and response types.

use crate::pipeline::Confirmation;
use registration_store::Registration;
use serde::Serialize;

/// Response after a registration was stored.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub registration: Registration,
    pub confirmation: Confirmation,
    pub message: String,
}

/// Administrative listing, newest first.
#[derive(Debug, Serialize)]
pub struct RegistrationsResponse {
    pub registrations: Vec<Registration>,
    pub total: usize,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}
