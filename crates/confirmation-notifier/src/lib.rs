//! Confirmation notifier - emails registration confirmations.
//!
//! A stateless HTTP endpoint that:
//! - Accepts already-stored registration details from a trusted caller
//! - Renders the confirmation email with payment instructions
//! - Relays the email provider's reply, with permissive CORS on every response

pub mod api;
pub mod config;
pub mod error;
pub mod template;

pub use config::{Config, EventDetails};
pub use error::NotifierError;
