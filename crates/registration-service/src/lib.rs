//! Registration service for the tech fest.
//!
//! Takes registrations as entered in the form and:
//! - Validates them field by field, failing on the first violation
//! - Stores them in the hosted `registrations` table, one attempt per submission
//! - Asks the confirmation notifier to email payment instructions, best effort

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod notify;
pub mod pipeline;
pub mod validator;

pub use config::Config;
pub use error::{ApiError, NotificationError, SubmissionError};
pub use form::{FormEvent, FormState};
pub use notify::{ConfirmationNotifier, HttpNotifier};
pub use pipeline::{Confirmation, RegistrationDesk, Submission};
pub use validator::{validate, Field, RegistrationInput, ValidationError};
