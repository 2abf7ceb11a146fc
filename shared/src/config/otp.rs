//! One-time code configuration

use serde::{Deserialize, Serialize};

use super::{check_range, env_or, ConfigError};

/// Longest accepted code lifetime (one day)
pub const MAX_TTL_MINUTES: i64 = 24 * 60;

/// Longest accepted resend cooldown (one hour)
pub const MAX_RESEND_COOLDOWN_SECONDS: i64 = 60 * 60;

/// Longest accepted retention of expired codes (one week)
pub const MAX_EXPIRED_RETENTION_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Backend holding accounts or pending verification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local map, lost on restart
    Memory,
    /// MySQL table
    Mysql,
    /// Redis keys with TTL (verification codes only)
    Redis,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            "mysql" => Ok(StoreBackend::Mysql),
            "redis" => Ok(StoreBackend::Redis),
            other => Err(ConfigError::InvalidValue {
                key: "store backend".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Mysql => write!(f, "mysql"),
            StoreBackend::Redis => write!(f, "redis"),
        }
    }
}

/// One-time code lifetime, resend policy and storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minutes a code stays valid after issue
    pub ttl_minutes: i64,

    /// Minimum seconds between two codes for the same identifier and purpose
    pub resend_cooldown_seconds: i64,

    /// Seconds to wait for the delivery gateway before failing the request
    pub delivery_timeout_seconds: u64,

    /// How often the expired-code sweeper runs
    pub sweep_interval_seconds: u64,

    /// How long expired codes are kept before the sweeper removes them
    pub expired_retention_seconds: i64,

    /// Where pending codes live
    pub store: StoreBackend,

    /// Where accounts live
    pub account_store: StoreBackend,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: 10,
            resend_cooldown_seconds: 60,
            delivery_timeout_seconds: 10,
            sweep_interval_seconds: 300,
            expired_retention_seconds: 3600,
            store: StoreBackend::Memory,
            account_store: StoreBackend::Memory,
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let store = match std::env::var("VERIFICATION_STORE") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.store,
        };
        let account_store = match std::env::var("ACCOUNT_STORE") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.account_store,
        };

        let config = Self {
            ttl_minutes: env_or("OTP_TTL_MINUTES", defaults.ttl_minutes),
            resend_cooldown_seconds: env_or(
                "OTP_RESEND_COOLDOWN_SECONDS",
                defaults.resend_cooldown_seconds,
            ),
            delivery_timeout_seconds: env_or(
                "OTP_DELIVERY_TIMEOUT_SECONDS",
                defaults.delivery_timeout_seconds,
            ),
            sweep_interval_seconds: env_or(
                "OTP_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            ),
            expired_retention_seconds: env_or(
                "OTP_EXPIRED_RETENTION_SECONDS",
                defaults.expired_retention_seconds,
            ),
            store,
            account_store,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would break the code lifecycle
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("OTP_TTL_MINUTES", self.ttl_minutes, 1, MAX_TTL_MINUTES)?;
        check_range(
            "OTP_RESEND_COOLDOWN_SECONDS",
            self.resend_cooldown_seconds,
            0,
            MAX_RESEND_COOLDOWN_SECONDS,
        )?;
        check_range(
            "OTP_EXPIRED_RETENTION_SECONDS",
            self.expired_retention_seconds,
            0,
            MAX_EXPIRED_RETENTION_SECONDS,
        )?;
        if self.delivery_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "OTP_DELIVERY_TIMEOUT_SECONDS".to_string(),
                value: "0".to_string(),
            });
        }
        if self.account_store == StoreBackend::Redis {
            return Err(ConfigError::InvalidValue {
                key: "ACCOUNT_STORE".to_string(),
                value: "redis".to_string(),
            });
        }
        Ok(())
    }
}
