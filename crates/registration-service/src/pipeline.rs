//! Submission pipeline: validate, store, then request the confirmation.

use crate::error::SubmissionError;
use crate::notify::ConfirmationNotifier;
use crate::validator::{validate, RegistrationInput};
use registration_store::{PersistenceError, Registration, RegistrationStore};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Whether the confirmation email was accepted by the notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confirmation {
    Sent,
    Failed,
}

/// A stored registration and the fate of its confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub registration: Registration,
    pub confirmation: Confirmation,
}

/// Runs submissions against a store and a notifier.
///
/// Each step is attempted once. The confirmation is best effort: a failed
/// notification leaves the stored row in place and is only logged.
#[derive(Clone)]
pub struct RegistrationDesk {
    store: Arc<dyn RegistrationStore>,
    notifier: Arc<dyn ConfirmationNotifier>,
}

impl RegistrationDesk {
    pub fn new(store: Arc<dyn RegistrationStore>, notifier: Arc<dyn ConfirmationNotifier>) -> Self {
        Self { store, notifier }
    }

    /// Validate, store and confirm one registration.
    #[instrument(skip_all)]
    pub async fn submit(&self, input: &RegistrationInput) -> Result<Submission, SubmissionError> {
        let registration = validate(input)?;

        let stored = self.store.insert(&registration).await.map_err(|e| {
            error!(error = %e, "Failed to store registration");
            SubmissionError::from(e)
        })?;

        info!(id = %stored.id, tickets = stored.tickets, "Registration stored");

        let confirmation = match self.notifier.notify(&stored).await {
            Ok(_) => Confirmation::Sent,
            Err(e) => {
                warn!(id = %stored.id, error = %e, "Confirmation email not sent");
                Confirmation::Failed
            }
        };

        Ok(Submission {
            registration: stored,
            confirmation,
        })
    }

    /// All registrations, newest first.
    pub async fn list(&self) -> Result<Vec<Registration>, PersistenceError> {
        self.store.list_all().await.map_err(|e| {
            error!(error = %e, "Failed to list registrations");
            e
        })
    }
}
