//! Tests for the Redis verification store

use chrono::{Duration, Utc};

use jt_core::domain::entities::{PendingVerification, Purpose};
use jt_core::repositories::VerificationStore;

use crate::cache::verification_store::{entry_key, key_ttl_seconds};
use crate::cache::{CacheConfig, RedisClient, RedisVerificationStore};

#[test]
fn test_entry_key_layout() {
    assert_eq!(
        entry_key("jt", "a@x.com", Purpose::PasswordReset),
        "jt:otp:password_reset:a@x.com"
    );
}

#[test]
fn test_key_ttl_covers_code_lifetime_and_retention() {
    let now = Utc::now();
    let mut entry =
        PendingVerification::issue("a@x.com".into(), "123456".into(), Purpose::Signup, 10);
    entry.expires_at = now + Duration::minutes(10);

    assert_eq!(key_ttl_seconds(&entry, 3600, now), 600 + 3600);
    assert_eq!(key_ttl_seconds(&entry, 0, now), 600);

    entry.expires_at = now - Duration::hours(5);
    assert_eq!(key_ttl_seconds(&entry, 3600, now), 1);
}

#[tokio::test]
#[ignore] // Requires a running Redis
async fn test_redis_store_keeps_expired_entries_until_eviction() {
    let client = RedisClient::new(&CacheConfig::from_env()).await.unwrap();
    let store = RedisVerificationStore::new(client, "jt-test", 60);
    let identifier = format!("redis-{}@x.com", uuid::Uuid::new_v4());

    let mut entry =
        PendingVerification::issue(identifier.clone(), "654321".into(), Purpose::Login, 10);
    entry.expires_at = Utc::now() - Duration::seconds(5);
    store.put(entry.clone()).await.unwrap();

    let fetched = store.get(&identifier, Purpose::Login).await.unwrap().unwrap();
    assert!(fetched.is_expired());
    assert_eq!(fetched.code, "654321");

    assert!(store.delete(&identifier, Purpose::Login).await.unwrap());
    assert!(!store.delete(&identifier, Purpose::Login).await.unwrap());
    assert_eq!(store.purge_expired(Utc::now()).await.unwrap(), 0);
}
