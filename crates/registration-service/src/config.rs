//! Configuration for the registration service.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Hosted store configuration (required)
    pub store: StoreConfig,

    /// Confirmation notifier configuration
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Administrative listing configuration
    #[serde(default)]
    pub admin: AdminConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Project URL of the hosted store
    pub url: String,

    /// Public API key of the hosted store
    pub api_key: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    /// Notifier endpoint; defaults to the hosted function next to the store
    #[serde(default)]
    pub url: Option<String>,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    /// Bearer token required to list registrations
    #[serde(default)]
    pub token: Option<String>,
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
pub struct RateLimitConfig {
    /// Submissions per minute allowed to one client address
    #[serde(default = "default_per_minute")]
    pub per_minute: u32,

    /// Identify clients by `X-Forwarded-For` (only behind a trusted proxy)
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout: default_timeout(),
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

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_minute: default_per_minute(),
            trust_forwarded_for: false,
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

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_per_minute() -> u32 {
    10
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
            .context("Failed to deserialize configuration (STORE__URL and STORE__API_KEY are required)")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the service cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.store.url.trim().is_empty() {
            bail!("STORE__URL must not be empty");
        }
        if self.store.api_key.trim().is_empty() {
            bail!("STORE__API_KEY must not be empty");
        }
        Ok(())
    }

    /// Where confirmation requests are posted.
    pub fn notifier_url(&self) -> String {
        match &self.notifier.url {
            Some(url) if !url.trim().is_empty() => url.clone(),
            _ => format!(
                "{}/functions/v1/send-confirmation-email",
                self.store.url.trim_end_matches('/')
            ),
        }
    }

    /// Admin token, if one is configured.
    pub fn admin_token(&self) -> Option<&str> {
        self.admin
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str, api_key: &str) -> Config {
        Config {
            store: StoreConfig {
                url: url.into(),
                api_key: api_key.into(),
                timeout: default_timeout(),
            },
            notifier: NotifierConfig::default(),
            admin: AdminConfig::default(),
            server: ServerConfig::default(),
            rate_limit: RateLimitConfig::default(),
            log: LogConfig::default(),
        }
    }

    #[test]
    fn test_missing_credentials_rejected() {
        assert!(config("", "key").validate().is_err());
        assert!(config("https://abc.supabase.co", " ").validate().is_err());
        assert!(config("https://abc.supabase.co", "key").validate().is_ok());
    }

    #[test]
    fn test_notifier_url_defaults_to_hosted_function() {
        let cfg = config("https://abc.supabase.co/", "key");
        assert_eq!(
            cfg.notifier_url(),
            "https://abc.supabase.co/functions/v1/send-confirmation-email"
        );

        let mut cfg = cfg;
        cfg.notifier.url = Some("http://notifier:8000/".into());
        assert_eq!(cfg.notifier_url(), "http://notifier:8000/");
    }

    #[test]
    fn test_blank_admin_token_is_none() {
        let mut cfg = config("https://abc.supabase.co", "key");
        cfg.admin.token = Some("  ".into());
        assert_eq!(cfg.admin_token(), None);

        cfg.admin.token = Some("s3cret".into());
        assert_eq!(cfg.admin_token(), Some("s3cret"));
    }
}
