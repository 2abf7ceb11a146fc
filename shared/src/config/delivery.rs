//! Outbound message delivery configuration

use serde::{Deserialize, Serialize};

use super::{env_or, ConfigError};

/// Which delivery gateway sends codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryProvider {
    /// Write messages to the log instead of sending them
    Log,
    /// Transactional email HTTP API
    Http,
}

impl std::str::FromStr for DeliveryProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "log" | "mock" | "console" => Ok(DeliveryProvider::Log),
            "http" | "brevo" | "email" => Ok(DeliveryProvider::Http),
            other => Err(ConfigError::InvalidValue {
                key: "DELIVERY_PROVIDER".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Delivery gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliveryConfig {
    /// Selected provider
    pub provider: DeliveryProvider,

    /// Email API endpoint
    pub api_url: String,

    /// Email API key
    #[serde(default)]
    pub api_key: String,

    /// Sender address shown to recipients
    pub sender_address: String,

    /// Sender display name
    pub sender_name: String,

    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            provider: DeliveryProvider::Log,
            api_url: String::from("https://api.brevo.com/v3/smtp/email"),
            api_key: String::new(),
            sender_address: String::from("noreply@jharkhand-tourism.com"),
            sender_name: String::from("Jharkhand Tourism"),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl DeliveryConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let provider = match std::env::var("DELIVERY_PROVIDER") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.provider,
        };
        Ok(Self {
            provider,
            api_url: std::env::var("EMAIL_API_URL").unwrap_or(defaults.api_url),
            api_key: std::env::var("EMAIL_API_KEY").unwrap_or(defaults.api_key),
            sender_address: std::env::var("EMAIL_SENDER_ADDRESS")
                .unwrap_or(defaults.sender_address),
            sender_name: std::env::var("EMAIL_SENDER_NAME").unwrap_or(defaults.sender_name),
            request_timeout_seconds: env_or(
                "EMAIL_REQUEST_TIMEOUT_SECONDS",
                defaults.request_timeout_seconds,
            ),
        })
    }

    /// Whether the HTTP provider has credentials to work with
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

fn default_request_timeout() -> u64 {
    8
}
