//! Client for the confirmation notifier endpoint.

use crate::error::NotificationError;
use async_trait::async_trait;
use registration_store::Registration;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Sends the confirmation for a stored registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfirmationNotifier: Send + Sync {
    /// Ask for a confirmation email. Returns the notifier's JSON reply.
    async fn notify(&self, registration: &Registration) -> Result<serde_json::Value, NotificationError>;
}

/// Body posted to the notifier.
#[derive(Debug, Serialize)]
struct ConfirmationPayload<'a> {
    name: &'a str,
    email: &'a str,
    city: &'a str,
    tickets: u8,
}

impl<'a> From<&'a Registration> for ConfirmationPayload<'a> {
    fn from(r: &'a Registration) -> Self {
        Self {
            name: &r.name,
            email: &r.email,
            city: &r.city,
            tickets: r.tickets,
        }
    }
}

/// Notifier reached over HTTP, invoked with the store's API key the way
/// hosted functions expect.
#[derive(Clone)]
pub struct HttpNotifier {
    client: Client,
    url: String,
    api_key: SecretString,
}

impl HttpNotifier {
    /// Create a new notifier client.
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotificationError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
            api_key: SecretString::new(api_key.into()),
        })
    }
}

#[async_trait]
impl ConfirmationNotifier for HttpNotifier {
    #[instrument(skip(self, registration), fields(id = %registration.id))]
    async fn notify(&self, registration: &Registration) -> Result<serde_json::Value, NotificationError> {
        let key = self.api_key.expose_secret();
        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", key))
            .header("apikey", key.as_str())
            .json(&ConfirmationPayload::from(registration))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Notifier errors come as {"error": "..."}; fall back to raw text
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or(body);
            warn!(%status, %message, "Notifier rejected confirmation");
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Confirmation requested");
        serde_json::from_str(&body).map_err(NotificationError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn stored() -> Registration {
        Registration {
            id: "row-1".into(),
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            city: "London".into(),
            tickets: 2,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn notifier(server: &MockServer) -> HttpNotifier {
        HttpNotifier::new(
            format!("{}/functions/v1/send-confirmation-email", server.uri()),
            "anon-key",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_notify_posts_registration_fields() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/functions/v1/send-confirmation-email"))
            .and(header("Authorization", "Bearer anon-key"))
            .and(header("apikey", "anon-key"))
            .and(body_json(serde_json::json!({
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "city": "London",
                "tickets": 2
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "email_1"})))
            .expect(1)
            .mount(&server)
            .await;

        let reply = notifier(&server).notify(&stored()).await.unwrap();
        assert_eq!(reply["id"], "email_1");
    }

    #[tokio::test]
    async fn test_notify_rejection_uses_error_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"error": "domain not verified"})),
            )
            .mount(&server)
            .await;

        match notifier(&server).notify(&stored()).await {
            Err(NotificationError::Rejected { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "domain not verified");
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_notify_rejection_plain_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        match notifier(&server).notify(&stored()).await {
            Err(NotificationError::Rejected { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }
}
