//! Configuration for the confirmation notifier.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Notifier configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Email provider configuration
    pub email: EmailConfig,

    /// Event details rendered into the confirmation
    #[serde(default)]
    pub event: EventDetails,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Email provider API key
    pub api_key: String,

    /// Provider base URL
    #[serde(default = "default_email_base_url")]
    pub base_url: String,

    /// Sender shown to recipients
    #[serde(default = "default_from")]
    pub from: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

/// Static details of the event, echoed in every confirmation.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDetails {
    #[serde(default = "default_event_name")]
    pub name: String,

    #[serde(default = "default_event_dates")]
    pub dates: String,

    #[serde(default = "default_event_location")]
    pub location: String,

    /// Price of one ticket in `currency` units
    #[serde(default = "default_ticket_price")]
    pub ticket_price: u64,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Virtual payment address that collects ticket payments
    #[serde(default = "default_upi_id")]
    pub upi_id: String,

    #[serde(default = "default_contact_phone")]
    pub contact_phone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for EventDetails {
    fn default() -> Self {
        Self {
            name: default_event_name(),
            dates: default_event_dates(),
            location: default_event_location(),
            ticket_price: default_ticket_price(),
            currency: default_currency(),
            upi_id: default_upi_id(),
            contact_phone: default_contact_phone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_email_base_url() -> String {
    "https://api.resend.com".into()
}

fn default_from() -> String {
    "Vyvidh'25 <onboarding@resend.dev>".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_event_name() -> String {
    "Vyvidh'25".into()
}

fn default_event_dates() -> String {
    "26th to 27th September, 2025".into()
}

fn default_event_location() -> String {
    "Will be shared soon".into()
}

fn default_ticket_price() -> u64 {
    30
}

fn default_currency() -> String {
    "₹".into()
}

fn default_upi_id() -> String {
    "jeswinjoy654@okhdfcbank".into()
}

fn default_contact_phone() -> String {
    "+91 8075637374".into()
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the notifier cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.email.api_key.trim().is_empty() {
            bail!("EMAIL__API_KEY must not be empty");
        }
        Ok(())
    }
}
