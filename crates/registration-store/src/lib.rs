//! Registration model and store client for the hosted `registrations` table.

mod error;
mod memory;
mod rest;
mod types;

pub use error::PersistenceError;
pub use memory::MemoryStore;
pub use rest::RestStore;
pub use types::*;

use async_trait::async_trait;

/// Persistence seam for registrations.
///
/// Each call is a single attempt: no retry, no transaction, no
/// deduplication.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Insert one registration and return the stored row.
    async fn insert(&self, registration: &NewRegistration) -> Result<Registration, PersistenceError>;

    /// Fetch every registration, newest first.
    async fn list_all(&self) -> Result<Vec<Registration>, PersistenceError>;
}
