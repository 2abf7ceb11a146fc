//! Pending verification entity: a one-time code awaiting submission.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of a verification code (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// What a verification code was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    Signup,
    Login,
    #[serde(alias = "password-reset")]
    PasswordReset,
}

impl Purpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Signup => "signup",
            Purpose::Login => "login",
            Purpose::PasswordReset => "password_reset",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "signup" => Ok(Purpose::Signup),
            "login" => Ok(Purpose::Login),
            "password_reset" | "password-reset" => Ok(Purpose::PasswordReset),
            other => Err(format!("Unknown verification purpose: {}", other)),
        }
    }
}

/// A code that has been issued and not yet consumed
///
/// At most one entry exists per `(identifier, purpose)`; issuing a new code
/// replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingVerification {
    /// Normalized email address the code was sent to
    pub identifier: String,

    /// The 6-digit code
    pub code: String,

    pub purpose: Purpose,

    pub issued_at: DateTime<Utc>,

    /// Always later than `issued_at`
    pub expires_at: DateTime<Utc>,
}

impl PendingVerification {
    /// Issue a new entry valid for `ttl_minutes` from now
    ///
    /// A lifetime past chrono's range saturates at the latest representable
    /// instant.
    pub fn issue(identifier: String, code: String, purpose: Purpose, ttl_minutes: i64) -> Self {
        let issued_at = Utc::now();
        Self {
            identifier,
            code,
            purpose,
            issued_at,
            expires_at: offset_or_max(issued_at, Duration::try_minutes(ttl_minutes)),
        }
    }

    /// Whether the code is past its expiry at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Seconds left before another code may be requested, if any
    pub fn cooldown_remaining(&self, cooldown_seconds: i64, now: DateTime<Utc>) -> Option<i64> {
        if cooldown_seconds <= 0 || self.is_expired_at(now) {
            return None;
        }
        let resend_at = offset_or_max(self.issued_at, Duration::try_seconds(cooldown_seconds));
        let remaining = (resend_at - now).num_seconds();
        if resend_at > now {
            Some(remaining.max(1))
        } else {
            None
        }
    }
}

/// `start + delta`, saturating at `DateTime::<Utc>::MAX_UTC` on overflow
pub(crate) fn offset_or_max(start: DateTime<Utc>, delta: Option<Duration>) -> DateTime<Utc> {
    delta
        .and_then(|delta| start.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
