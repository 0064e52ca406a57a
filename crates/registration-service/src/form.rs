//! Registration form state.
//!
//! The form is an immutable value; every interaction produces the next
//! state through [`FormState::apply`] or [`FormState::begin_submit`].

use crate::error::{SubmissionError, RETRY_LATER};
use crate::pipeline::Submission;
use crate::validator::{validate, Field, RegistrationInput};
use serde::Serialize;
use serde_json::Value;

/// Whether a submission is in flight. The submit control is disabled while
/// `Submitting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Editing,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Destructive,
}

/// Feedback shown after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    fn success() -> Self {
        Self {
            title: "Registration Successful!".into(),
            description: "Check your email for confirmation and payment details.".into(),
            variant: ToastVariant::Default,
        }
    }

    fn validation(message: impl Into<String>) -> Self {
        Self {
            title: "Validation Error".into(),
            description: message.into(),
            variant: ToastVariant::Destructive,
        }
    }

    fn failure() -> Self {
        Self {
            title: "Registration Failed".into(),
            description: RETRY_LATER.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

/// Why a submit attempt ended without a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    /// Input problem the user can fix; carries the message to show
    Invalid(String),
    /// Anything else
    Unavailable,
}

impl From<&SubmissionError> for SubmitFailure {
    fn from(e: &SubmissionError) -> Self {
        match e {
            SubmissionError::Validation(v) => SubmitFailure::Invalid(v.message.clone()),
            SubmissionError::Persistence(_) => SubmitFailure::Unavailable,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// A field was edited; tickets arrive as the selected option's text
    FieldChanged { field: Field, value: String },
    SubmitSucceeded,
    SubmitFailed(SubmitFailure),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormState {
    pub fields: RegistrationInput,
    pub phase: Phase,
    pub toast: Option<Toast>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            fields: blank_fields(),
            phase: Phase::Editing,
            toast: None,
        }
    }
}

fn blank_fields() -> RegistrationInput {
    RegistrationInput {
        name: String::new(),
        email: String::new(),
        city: String::new(),
        tickets: Value::from(1),
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Editing
    }

    /// Produce the state that follows `event`.
    pub fn apply(self, event: FormEvent) -> Self {
        match event {
            FormEvent::FieldChanged { field, value } => {
                let mut fields = self.fields;
                match field {
                    Field::Name => fields.name = value,
                    Field::Email => fields.email = value,
                    Field::City => fields.city = value,
                    Field::Tickets => {
                        fields.tickets = match value.trim().parse::<i64>() {
                            Ok(n) => Value::from(n),
                            Err(_) => Value::String(value),
                        }
                    }
                }
                Self { fields, ..self }
            }
            FormEvent::SubmitSucceeded => Self {
                fields: blank_fields(),
                phase: Phase::Editing,
                toast: Some(Toast::success()),
            },
            FormEvent::SubmitFailed(failure) => {
                let toast = match failure {
                    SubmitFailure::Invalid(message) => Toast::validation(message),
                    SubmitFailure::Unavailable => Toast::failure(),
                };
                Self {
                    phase: Phase::Editing,
                    toast: Some(toast),
                    ..self
                }
            }
        }
    }

    /// Start a submission.
    ///
    /// Invalid input never enters `Submitting`: the state comes back with a
    /// validation toast. A state that is already submitting comes back
    /// unchanged. Otherwise the returned state is `Submitting` and carries
    /// the snapshot to hand to the pipeline.
    pub fn begin_submit(self) -> Result<(Self, RegistrationInput), Self> {
        if !self.can_submit() {
            return Err(self);
        }

        if let Err(e) = validate(&self.fields) {
            return Err(self.apply(FormEvent::SubmitFailed(SubmitFailure::Invalid(e.message))));
        }

        let snapshot = self.fields.clone();
        Ok((
            Self {
                phase: Phase::Submitting,
                toast: None,
                ..self
            },
            snapshot,
        ))
    }

    /// Fold a pipeline outcome back into the form.
    pub fn finish(self, outcome: &Result<Submission, SubmissionError>) -> Self {
        match outcome {
            Ok(_) => self.apply(FormEvent::SubmitSucceeded),
            Err(e) => self.apply(FormEvent::SubmitFailed(SubmitFailure::from(e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MockConfirmationNotifier;
    use crate::pipeline::RegistrationDesk;
    use registration_store::{MemoryStore, PersistenceError};
    use serde_json::json;
    use std::sync::Arc;

    fn edit(state: FormState, field: Field, value: &str) -> FormState {
        state.apply(FormEvent::FieldChanged {
            field,
            value: value.to_string(),
        })
    }

    fn filled() -> FormState {
        let state = edit(FormState::new(), Field::Name, "Ada Lovelace");
        let state = edit(state, Field::Email, "ada@example.com");
        let state = edit(state, Field::City, "London");
        edit(state, Field::Tickets, "2")
    }

    #[test]
    fn test_defaults() {
        let state = FormState::new();
        assert_eq!(state.fields.tickets, json!(1));
        assert!(state.fields.name.is_empty());
        assert!(state.can_submit());
        assert!(state.toast.is_none());
    }

    #[test]
    fn test_field_changes_leave_original_untouched() {
        let before = FormState::new();
        let after = edit(before.clone(), Field::Name, "Ada");

        assert_eq!(before.fields.name, "");
        assert_eq!(after.fields.name, "Ada");
    }

    #[test]
    fn test_tickets_selection_parsed() {
        let state = edit(FormState::new(), Field::Tickets, "3");
        assert_eq!(state.fields.tickets, json!(3));

        let state = edit(state, Field::Tickets, "lots");
        assert_eq!(state.fields.tickets, json!("lots"));
    }

    #[test]
    fn test_begin_submit_moves_to_submitting() {
        let (state, snapshot) = filled().begin_submit().unwrap();

        assert_eq!(state.phase, Phase::Submitting);
        assert!(!state.can_submit());
        assert_eq!(snapshot.name, "Ada Lovelace");
        assert_eq!(snapshot.tickets, json!(2));
    }

    #[test]
    fn test_second_submit_refused_while_in_flight() {
        let (state, _) = filled().begin_submit().unwrap();
        let refused = state.clone().begin_submit().unwrap_err();
        assert_eq!(refused, state);
    }

    #[test]
    fn test_invalid_input_shows_validation_toast() {
        let state = edit(filled(), Field::Name, "A");
        let state = state.begin_submit().unwrap_err();

        assert_eq!(state.phase, Phase::Editing);
        let toast = state.toast.unwrap();
        assert_eq!(toast.title, "Validation Error");
        assert_eq!(toast.description, "Name must be at least 2 characters");
        assert_eq!(toast.variant, ToastVariant::Destructive);
    }

    #[test]
    fn test_success_resets_fields() {
        let (state, _) = filled().begin_submit().unwrap();
        let state = state.apply(FormEvent::SubmitSucceeded);

        assert_eq!(state.fields, FormState::new().fields);
        assert_eq!(state.phase, Phase::Editing);
        assert_eq!(state.toast.unwrap().title, "Registration Successful!");
    }

    #[test]
    fn test_failure_keeps_fields_with_generic_message() {
        let (state, _) = filled().begin_submit().unwrap();
        let outcome = Err(SubmissionError::from(PersistenceError::EmptyResponse));
        let state = state.finish(&outcome);

        assert_eq!(state.fields.name, "Ada Lovelace");
        assert!(state.can_submit());
        let toast = state.toast.unwrap();
        assert_eq!(toast.title, "Registration Failed");
        assert_eq!(toast.description, "Please try again later.");
    }

    #[tokio::test]
    async fn test_form_drives_pipeline() {
        let mut notifier = MockConfirmationNotifier::new();
        notifier
            .expect_notify()
            .times(1)
            .returning(|_| Ok(json!({"id": "email_1"})));
        let desk = RegistrationDesk::new(Arc::new(MemoryStore::new()), Arc::new(notifier));

        let (state, snapshot) = filled().begin_submit().unwrap();
        let outcome = desk.submit(&snapshot).await;
        let state = state.finish(&outcome);

        assert!(outcome.is_ok());
        assert_eq!(state.toast.unwrap().title, "Registration Successful!");
        assert!(state.fields.name.is_empty());
    }
}
