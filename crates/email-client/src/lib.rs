//! Client for the transactional email delivery API.

mod client;
mod error;
mod types;

pub use client::EmailClient;
pub use error::EmailError;
pub use types::*;
