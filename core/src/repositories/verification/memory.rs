//! In-memory verification store
//!
//! Each instance owns its map; share it by cloning the handle, never through
//! a process-wide global.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{PendingVerification, Purpose};
use crate::errors::DomainError;

use super::trait_::VerificationStore;

type Key = (String, Purpose);

#[derive(Clone, Default)]
pub struct InMemoryVerificationStore {
    entries: Arc<RwLock<HashMap<Key, PendingVerification>>>,
}

impl InMemoryVerificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl VerificationStore for InMemoryVerificationStore {
    async fn put(&self, entry: PendingVerification) -> Result<(), DomainError> {
        let key = (entry.identifier.clone(), entry.purpose);
        self.entries.write().await.insert(key, entry);
        Ok(())
    }

    async fn get(
        &self,
        identifier: &str,
        purpose: Purpose,
    ) -> Result<Option<PendingVerification>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.get(&(identifier.to_string(), purpose)).cloned())
    }

    async fn delete(&self, identifier: &str, purpose: Purpose) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        Ok(entries.remove(&(identifier.to_string(), purpose)).is_some())
    }

    async fn purge_expired(&self, before: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut entries = self.entries.write().await;
        let initial = entries.len();
        entries.retain(|_, entry| entry.expires_at >= before);
        Ok((initial - entries.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(identifier: &str, code: &str, purpose: Purpose) -> PendingVerification {
        PendingVerification::issue(identifier.to_string(), code.to_string(), purpose, 10)
    }

    #[tokio::test]
    async fn test_put_replaces_same_key() {
        let store = InMemoryVerificationStore::new();
        store.put(entry("a@x.com", "111111", Purpose::Signup)).await.unwrap();
        store.put(entry("a@x.com", "222222", Purpose::Signup)).await.unwrap();

        let stored = store.get("a@x.com", Purpose::Signup).await.unwrap().unwrap();
        assert_eq!(stored.code, "222222");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_purposes_are_separate() {
        let store = InMemoryVerificationStore::new();
        store.put(entry("a@x.com", "111111", Purpose::Signup)).await.unwrap();
        store.put(entry("a@x.com", "222222", Purpose::Login)).await.unwrap();

        assert!(store.delete("a@x.com", Purpose::Signup).await.unwrap());
        assert!(!store.delete("a@x.com", Purpose::Signup).await.unwrap());
        assert!(store.get("a@x.com", Purpose::Login).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryVerificationStore::new();
        let handle = store.clone();
        store.put(entry("a@x.com", "111111", Purpose::Signup)).await.unwrap();
        assert!(handle.get("a@x.com", Purpose::Signup).await.unwrap().is_some());
        assert!(InMemoryVerificationStore::new().is_empty().await);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let store = InMemoryVerificationStore::new();
        let mut stale = entry("old@x.com", "111111", Purpose::Login);
        stale.expires_at = Utc::now() - Duration::hours(2);
        store.put(stale).await.unwrap();
        store.put(entry("new@x.com", "222222", Purpose::Login)).await.unwrap();

        let purged = store
            .purge_expired(Utc::now() - Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(purged, 1);
        assert!(store.get("old@x.com", Purpose::Login).await.unwrap().is_none());
        assert!(store.get("new@x.com", Purpose::Login).await.unwrap().is_some());
    }
}
