//! Registration input validation.
//!
//! Rules are checked in field order (name, email, city, tickets) and the
//! first violation wins.

use registration_store::NewRegistration;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::num::IntErrorKind;
use std::sync::OnceLock;
use thiserror::Error;

/// Minimum length of name and city, in characters after trimming.
pub const TEXT_MIN: usize = 2;
/// Maximum length of name and city, in characters after trimming.
pub const TEXT_MAX: usize = 100;
/// Maximum email length, in characters after trimming.
pub const EMAIL_MAX: usize = 255;
/// Fewest tickets per registration.
pub const TICKETS_MIN: i64 = 1;
/// Most tickets per registration.
pub const TICKETS_MAX: i64 = 10;

/// Registration form fields as entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationInput {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub city: String,

    /// Number or numeric string
    #[serde(default)]
    pub tickets: Value,
}

/// A registration form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    City,
    Tickets,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::City => "city",
            Field::Tickets => "tickets",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First constraint a registration violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a submission and normalize it into a storable registration.
pub fn validate(input: &RegistrationInput) -> Result<NewRegistration, ValidationError> {
    let name = bounded_text(Field::Name, "Name", &input.name)?;
    let email = email(&input.email)?;
    let city = bounded_text(Field::City, "City", &input.city)?;
    let tickets = tickets(&input.tickets)?;

    Ok(NewRegistration {
        name,
        email,
        city,
        tickets,
    })
}

fn bounded_text(field: Field, label: &str, raw: &str) -> Result<String, ValidationError> {
    let value = raw.trim();
    let length = value.chars().count();

    if length < TEXT_MIN {
        return Err(ValidationError::new(
            field,
            format!("{} must be at least {} characters", label, TEXT_MIN),
        ));
    }
    if length > TEXT_MAX {
        return Err(ValidationError::new(
            field,
            format!("{} must be less than {} characters", label, TEXT_MAX),
        ));
    }

    Ok(value.to_string())
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        // Leading and doubled dots are rejected separately; the regex crate
        // has no lookahead.
        let pattern = r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Standard email syntax: local part, `@`, dotted domain ending in a TLD.
pub fn is_valid_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && email_regex().is_match(value)
}

fn email(raw: &str) -> Result<String, ValidationError> {
    let value = raw.trim();

    if !is_valid_email(value) {
        return Err(ValidationError::new(
            Field::Email,
            "Please enter a valid email address",
        ));
    }
    if value.chars().count() > EMAIL_MAX {
        return Err(ValidationError::new(
            Field::Email,
            format!("Email must be less than {} characters", EMAIL_MAX),
        ));
    }

    Ok(value.to_string())
}

/// Whole numbers outside `i64` are clamped so they fail the range check,
/// not the whole-number check.
fn whole_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else if n.as_u64().is_some() {
                Some(i64::MAX)
            } else {
                // `as` saturates at the i64 bounds
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            }
        }
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(i) => Some(i),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Some(i64::MAX),
                IntErrorKind::NegOverflow => Some(i64::MIN),
                _ => None,
            },
        },
        _ => None,
    }
}

fn tickets(raw: &Value) -> Result<u8, ValidationError> {
    let count = whole_number(raw)
        .ok_or_else(|| ValidationError::new(Field::Tickets, "Tickets must be a whole number"))?;

    if count < TICKETS_MIN {
        return Err(ValidationError::new(
            Field::Tickets,
            "Please select at least 1 ticket",
        ));
    }
    if count > TICKETS_MAX {
        return Err(ValidationError::new(
            Field::Tickets,
            format!("Maximum {} tickets per registration", TICKETS_MAX),
        ));
    }

    u8::try_from(count)
        .map_err(|_| ValidationError::new(Field::Tickets, "Tickets must be a whole number"))
}
