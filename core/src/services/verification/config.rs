//! Configuration for the verification service

use jt_shared::config::OtpConfig;

use crate::domain::entities::DEFAULT_EXPIRATION_MINUTES;

#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a code expires
    pub code_ttl_minutes: i64,
    /// Minimum seconds between two codes for the same identifier and purpose (0 disables)
    pub resend_cooldown_seconds: i64,
    /// Upper bound on a single delivery attempt
    pub delivery_timeout_seconds: u64,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: DEFAULT_EXPIRATION_MINUTES,
            resend_cooldown_seconds: 60,
            delivery_timeout_seconds: 10,
        }
    }
}

impl From<&OtpConfig> for VerificationServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_ttl_minutes: config.ttl_minutes,
            resend_cooldown_seconds: config.resend_cooldown_seconds,
            delivery_timeout_seconds: config.delivery_timeout_seconds,
        }
    }
}
