//! Session token configuration

use serde::{Deserialize, Serialize};

use super::{check_range, env_or, ConfigError};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// Longest accepted session lifetime
pub const MAX_EXPIRY_DAYS: i64 = 365;

/// JWT session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Session token lifetime in days
    #[serde(default = "default_expiry_days")]
    pub expiry_days: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            expiry_days: default_expiry_days(),
            issuer: String::from("jharkhand-tourism"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            expiry_days: env_or("JWT_EXPIRY_DAYS", defaults.expiry_days),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }

    /// Reject lifetimes that would issue already-expired or unbounded tokens
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("JWT_EXPIRY_DAYS", self.expiry_days, 1, MAX_EXPIRY_DAYS)
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

fn default_expiry_days() -> i64 {
    7
}
