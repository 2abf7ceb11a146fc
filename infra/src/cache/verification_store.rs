//! Redis implementation of the VerificationStore trait
//!
//! Key pattern: `{prefix}:otp:{purpose}:{identifier}`, value is the JSON
//! encoded entry. Keys outlive `expires_at` by the retention window so an
//! expired code is still reported as expired rather than missing; Redis
//! evicts them afterwards, which makes `purge_expired` a no-op.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use jt_core::domain::entities::{PendingVerification, Purpose};
use jt_core::errors::DomainError;
use jt_core::repositories::VerificationStore;

use super::RedisClient;
use crate::InfrastructureError;

/// Redis-backed store for pending codes
#[derive(Clone)]
pub struct RedisVerificationStore {
    client: RedisClient,
    key_prefix: String,
    retention_seconds: i64,
}

impl RedisVerificationStore {
    pub fn new(client: RedisClient, key_prefix: impl Into<String>, retention_seconds: i64) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
            retention_seconds: retention_seconds.max(0),
        }
    }

    fn key(&self, identifier: &str, purpose: Purpose) -> String {
        entry_key(&self.key_prefix, identifier, purpose)
    }
}

pub(crate) fn entry_key(prefix: &str, identifier: &str, purpose: Purpose) -> String {
    format!("{}:otp:{}:{}", prefix, purpose.as_str(), identifier)
}

/// Seconds until the key should be evicted; never below one
pub(crate) fn key_ttl_seconds(
    entry: &PendingVerification,
    retention_seconds: i64,
    now: DateTime<Utc>,
) -> u64 {
    let remaining = (entry.expires_at - now).num_seconds() + retention_seconds;
    remaining.max(1) as u64
}

#[async_trait]
impl VerificationStore for RedisVerificationStore {
    async fn put(&self, entry: PendingVerification) -> Result<(), DomainError> {
        let key = self.key(&entry.identifier, entry.purpose);
        let ttl = key_ttl_seconds(&entry, self.retention_seconds, Utc::now());
        let value = serde_json::to_string(&entry).map_err(InfrastructureError::from)?;

        self.client.set_with_expiry(&key, &value, ttl).await?;
        debug!(purpose = %entry.purpose, ttl_seconds = ttl, "Stored verification code in Redis");
        Ok(())
    }

    async fn get(
        &self,
        identifier: &str,
        purpose: Purpose,
    ) -> Result<Option<PendingVerification>, DomainError> {
        let Some(raw) = self.client.get(&self.key(identifier, purpose)).await? else {
            return Ok(None);
        };

        let entry = serde_json::from_str::<PendingVerification>(&raw)
            .map_err(InfrastructureError::from)?;
        Ok(Some(entry))
    }

    async fn delete(&self, identifier: &str, purpose: Purpose) -> Result<bool, DomainError> {
        Ok(self.client.delete(&self.key(identifier, purpose)).await?)
    }

    async fn purge_expired(&self, _before: DateTime<Utc>) -> Result<u64, DomainError> {
        Ok(0)
    }
}
