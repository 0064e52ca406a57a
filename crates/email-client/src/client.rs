//! Email delivery HTTP client.

use crate::error::EmailError;
use crate::types::OutgoingEmail;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Email delivery API client.
///
/// The API key is stored using `SecretString` to prevent accidental
/// exposure in logs or debug output.
#[derive(Clone)]
pub struct EmailClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl EmailClient {
    /// Create a new email client.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, EmailError> {
        let client = Client::builder().timeout(timeout).build()?;

        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: SecretString::new(api_key.into()),
        })
    }

    /// Send one email. Returns the provider's JSON body untouched.
    ///
    /// A single attempt is made; callers decide what a failure means.
    #[instrument(skip(self, email), fields(recipients = email.to.len()))]
    pub async fn send(&self, email: &OutgoingEmail) -> Result<serde_json::Value, EmailError> {
        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .header("Content-Type", "application/json")
            .json(email)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            // An unreadable rejection is a transport failure, not a provider verdict
            let body = response.text().await?;
            warn!(status = %status, body = %body, "Email provider rejected request");
            return Err(EmailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        debug!("Email accepted by provider");
        serde_json::from_str(&body).map_err(EmailError::from)
    }
}
