//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT session token configuration
//! - `cache` - Redis connection configuration
//! - `database` - Database connection and pool configuration
//! - `delivery` - Outbound message delivery (email API) configuration
//! - `environment` - Environment detection and logging configuration
//! - `otp` - One-time code lifetime, cooldown and storage backend
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod delivery;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use delivery::{DeliveryConfig, DeliveryProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::{OtpConfig, StoreBackend};
pub use server::{CorsConfig, ServerConfig};

/// Errors raised while validating loaded configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set in production")]
    DefaultJwtSecret,

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("{key}=memory loses state on restart and is not allowed in production")]
    ProcessLocalStore { key: String },

    #[error("DELIVERY_PROVIDER=log does not deliver codes and is not allowed in production")]
    LogDeliveryInProduction,

    #[error("EMAIL_API_KEY must be set in production")]
    MissingDeliveryKey,
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Redis configuration
    pub cache: CacheConfig,

    /// Session token configuration
    pub jwt: JwtConfig,

    /// One-time code configuration
    pub otp: OtpConfig,

    /// Message delivery configuration
    pub delivery: DeliveryConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            jwt: JwtConfig::default(),
            otp: OtpConfig::default(),
            delivery: DeliveryConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        Ok(Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            jwt: JwtConfig::from_env(),
            otp: OtpConfig::from_env()?,
            delivery: DeliveryConfig::from_env()?,
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        })
    }

    /// Check value ranges, plus settings that must never reach production
    /// unchanged
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment.is_production() {
            self.validate_production()?;
        }
        self.jwt.validate()?;
        self.otp.validate()
    }

    fn validate_production(&self) -> Result<(), ConfigError> {
        if self.jwt.is_using_default_secret() {
            return Err(ConfigError::DefaultJwtSecret);
        }
        for (key, backend) in [
            ("VERIFICATION_STORE", self.otp.store),
            ("ACCOUNT_STORE", self.otp.account_store),
        ] {
            if backend == StoreBackend::Memory {
                return Err(ConfigError::ProcessLocalStore {
                    key: key.to_string(),
                });
            }
        }
        match self.delivery.provider {
            DeliveryProvider::Log => Err(ConfigError::LogDeliveryInProduction),
            DeliveryProvider::Http if !self.delivery.has_api_key() => {
                Err(ConfigError::MissingDeliveryKey)
            }
            DeliveryProvider::Http => Ok(()),
        }
    }
}

/// Read an environment variable and parse it, falling back to `default`
/// when it is unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Fail with `InvalidValue` unless `min <= value <= max`
pub(crate) fn check_range(key: &str, value: i64, min: i64, max: i64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid_outside_production() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let config = AppConfig {
            environment: Environment::Production,
            ..AppConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DefaultJwtSecret));
    }

    fn production_config() -> AppConfig {
        AppConfig {
            environment: Environment::Production,
            jwt: JwtConfig::new("a-long-random-production-secret"),
            otp: OtpConfig {
                store: StoreBackend::Redis,
                account_store: StoreBackend::Mysql,
                ..OtpConfig::default()
            },
            delivery: DeliveryConfig {
                provider: DeliveryProvider::Http,
                api_key: "production-api-key".to_string(),
                ..DeliveryConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_production_accepts_durable_backends_and_keyed_delivery() {
        assert!(production_config().validate().is_ok());
    }

    #[test]
    fn test_production_rejects_memory_backends() {
        let mut config = production_config();
        config.otp.store = StoreBackend::Memory;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ProcessLocalStore {
                key: "VERIFICATION_STORE".to_string()
            })
        );

        let mut config = production_config();
        config.otp.account_store = StoreBackend::Memory;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ProcessLocalStore {
                key: "ACCOUNT_STORE".to_string()
            })
        );
    }

    #[test]
    fn test_production_rejects_undeliverable_provider() {
        let mut config = production_config();
        config.delivery.provider = DeliveryProvider::Log;
        assert_eq!(config.validate(), Err(ConfigError::LogDeliveryInProduction));

        let mut config = production_config();
        config.delivery.api_key = String::new();
        assert_eq!(config.validate(), Err(ConfigError::MissingDeliveryKey));
    }

    #[test]
    fn test_staging_keeps_development_backends() {
        let config = AppConfig {
            environment: Environment::Staging,
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_covers_session_lifetime() {
        let mut config = AppConfig::default();
        config.jwt.expiry_days = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { key, .. }) if key == "JWT_EXPIRY_DAYS"
        ));
    }
}
