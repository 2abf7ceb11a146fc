//! Credential store trait for pending verification codes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{PendingVerification, Purpose};
use crate::errors::DomainError;

/// Storage for issued, unconsumed codes keyed by `(identifier, purpose)`
///
/// `get` may return an entry that is already past `expires_at` if it has not
/// been swept yet; callers apply the expiry check themselves.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Insert or replace the entry for its `(identifier, purpose)`
    async fn put(&self, entry: PendingVerification) -> Result<(), DomainError>;

    /// Fetch the entry for `(identifier, purpose)`
    async fn get(
        &self,
        identifier: &str,
        purpose: Purpose,
    ) -> Result<Option<PendingVerification>, DomainError>;

    /// Remove the entry; returns whether one was present
    async fn delete(&self, identifier: &str, purpose: Purpose) -> Result<bool, DomainError>;

    /// Remove every entry that expired before `before`; returns the count
    async fn purge_expired(&self, before: DateTime<Utc>) -> Result<u64, DomainError>;
}
