//! Session token claims.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::{Account, Role};
use super::pending_verification::offset_or_max;

/// Default session lifetime (7 days)
pub const SESSION_EXPIRY_DAYS: i64 = 7;

/// Default JWT issuer
pub const SESSION_ISSUER: &str = "jharkhand-tourism";

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (account ID)
    pub sub: String,

    pub role: Role,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    pub iss: String,

    /// Unique token ID
    pub jti: String,
}

impl SessionClaims {
    /// Claims for `account`, issued at `now` and valid for `expiry_days`
    ///
    /// An expiry past chrono's range saturates instead of overflowing.
    pub fn for_account(account: &Account, issuer: &str, expiry_days: i64, now: DateTime<Utc>) -> Self {
        Self {
            sub: account.id.to_string(),
            role: account.role,
            iat: now.timestamp(),
            exp: offset_or_max(now, Duration::try_days(expiry_days)).timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Gets the account ID from the claims
    pub fn account_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
