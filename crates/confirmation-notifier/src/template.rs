//! Confirmation email rendering.

use crate::api::ConfirmationRequest;
use crate::config::EventDetails;
use askama::Template;

/// Total owed for `tickets` at the event's per-ticket price.
pub fn amount_due(tickets: u32, event: &EventDetails) -> u64 {
    u64::from(tickets).saturating_mul(event.ticket_price)
}

/// Subject line; "Ticket" is pluralized for more than one ticket.
pub fn subject(tickets: u32, event: &EventDetails) -> String {
    let plural = if tickets > 1 { "s" } else { "" };
    format!(
        "🎉 Registration Confirmed - {} | {} Ticket{}",
        event.name, tickets, plural
    )
}

/// HTML body of the confirmation email. Interpolated values are escaped.
#[derive(Template)]
#[template(path = "confirmation.html")]
pub struct ConfirmationEmail<'a> {
    pub request: &'a ConfirmationRequest,
    pub event: &'a EventDetails,
    pub amount: u64,
    /// Payment note without punctuation, e.g. "Vyvidh25"
    pub note: String,
    /// Contact number reduced to what a `tel:` link accepts
    pub tel: String,
}

impl<'a> ConfirmationEmail<'a> {
    pub fn new(request: &'a ConfirmationRequest, event: &'a EventDetails) -> Self {
        Self {
            request,
            event,
            amount: amount_due(request.tickets, event),
            note: event.name.chars().filter(|c| c.is_alphanumeric()).collect(),
            tel: event
                .contact_phone
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '+')
                .collect(),
        }
    }
}

/// Render the confirmation email body.
pub fn render(request: &ConfirmationRequest, event: &EventDetails) -> askama::Result<String> {
    ConfirmationEmail::new(request, event).render()
}
