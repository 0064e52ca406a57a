//! PostgREST-style client for the hosted registrations table.

use crate::error::PersistenceError;
use crate::types::{NewRegistration, Registration, REGISTRATIONS_TABLE};
use crate::RegistrationStore;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Client for the hosted table store.
///
/// The API key is stored using `SecretString` so it never shows up in
/// debug output.
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl RestStore {
    /// Create a new store client.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, PersistenceError> {
        let client = Client::builder().timeout(timeout).build()?;

        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: SecretString::new(api_key.into()),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, REGISTRATIONS_TABLE)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.api_key.expose_secret();
        request
            .header("apikey", key.as_str())
            .header("Authorization", format!("Bearer {}", key))
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, PersistenceError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(PersistenceError::from)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    async fn extract_error(&self, response: reqwest::Response) -> PersistenceError {
        let status = response.status();

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!(%status, "Store rejected credentials");
                PersistenceError::Unauthorized
            }
            _ => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".into());
                warn!(%status, body = %message, "Store request failed");
                PersistenceError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}

#[async_trait]
impl RegistrationStore for RestStore {
    #[instrument(skip(self, registration), fields(tickets = registration.tickets))]
    async fn insert(&self, registration: &NewRegistration) -> Result<Registration, PersistenceError> {
        let response = self
            .authorized(self.client.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&[registration])
            .send()
            .await?;

        let rows: Vec<Registration> = self.handle_response(response).await?;
        let stored = rows.into_iter().next().ok_or(PersistenceError::EmptyResponse)?;

        debug!(id = %stored.id, "Registration stored");
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Registration>, PersistenceError> {
        let response = self
            .authorized(self.client.get(self.table_url()))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;

        let rows: Vec<Registration> = self.handle_response(response).await?;
        debug!(count = rows.len(), "Fetched registrations");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let store = RestStore::new("http://localhost:54321/", "anon-key", Duration::from_secs(5));
        assert!(store.is_ok());
        assert_eq!(
            store.unwrap().table_url(),
            "http://localhost:54321/rest/v1/registrations"
        );
    }
}
