//! Registration rows as stored in the `registrations` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the table holding registrations.
pub const REGISTRATIONS_TABLE: &str = "registrations";

/// A registration that passed validation but has not been stored yet.
///
/// Fields are already trimmed and within bounds; the store assigns `id`
/// and the timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegistration {
    pub name: String,
    pub email: String,
    pub city: String,
    pub tickets: u8,
}

/// A stored registration row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Opaque identifier assigned by the store at insert
    pub id: String,

    pub name: String,
    pub email: String,
    pub city: String,
    pub tickets: u8,

    /// Assigned by the store at insert
    pub created_at: DateTime<Utc>,

    /// Maintained by the store, absent on stores that don't track it
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Registration {
    /// The user-supplied part of the row.
    pub fn details(&self) -> NewRegistration {
        NewRegistration {
            name: self.name.clone(),
            email: self.email.clone(),
            city: self.city.clone(),
            tickets: self.tickets,
        }
    }
}
