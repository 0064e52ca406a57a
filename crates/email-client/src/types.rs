//! Email provider request types.

use serde::Serialize;

/// Body of `POST /emails`.
#[derive(Debug, Clone, Serialize)]
pub struct OutgoingEmail {
    /// Sender, e.g. `Vyvidh'25 <onboarding@resend.dev>`
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

impl OutgoingEmail {
    /// Build an HTML email addressed to a single recipient.
    pub fn html(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: vec![to.into()],
            subject: subject.into(),
            html: html.into(),
        }
    }
}
