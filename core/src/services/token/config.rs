//! Configuration for the session token service

use jt_shared::config::JwtConfig;

use crate::domain::entities::{SESSION_EXPIRY_DAYS, SESSION_ISSUER};

#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// `iss` claim written and required on verify
    pub issuer: String,
    /// Session lifetime in days
    pub expiry_days: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            issuer: SESSION_ISSUER.to_string(),
            expiry_days: SESSION_EXPIRY_DAYS,
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            issuer: config.issuer.clone(),
            expiry_days: config.expiry_days,
        }
    }
}
