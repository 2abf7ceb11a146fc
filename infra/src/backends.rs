//! Runtime backend selection
//!
//! Turns `AppConfig` into the trait objects the core services are built
//! from. MySQL is only connected when one of the stores asks for it.

use std::sync::Arc;

use jt_core::repositories::{
    AccountRepository, InMemoryAccountRepository, InMemoryVerificationStore, VerificationStore,
};
use jt_core::services::verification::DeliveryGateway;
use jt_shared::config::{AppConfig, StoreBackend};
use tracing::info;

use crate::cache::{RedisClient, RedisVerificationStore};
use crate::database::{DatabasePool, MySqlAccountRepository, MySqlVerificationStore};
use crate::delivery::create_delivery_gateway;
use crate::InfrastructureError;

/// Collaborators for the core services
#[derive(Clone)]
pub struct Backends {
    pub accounts: Arc<dyn AccountRepository>,
    pub store: Arc<dyn VerificationStore>,
    pub gateway: Arc<dyn DeliveryGateway>,
    /// Present when a MySQL backend is in use, for shutdown
    pub database: Option<DatabasePool>,
}

pub async fn build_backends(config: &AppConfig) -> Result<Backends, InfrastructureError> {
    let otp = &config.otp;

    let database = if otp.store == StoreBackend::Mysql || otp.account_store == StoreBackend::Mysql {
        let pool = DatabasePool::new(&config.database).await?;
        if config.database.bootstrap_schema {
            pool.bootstrap_schema().await?;
        }
        Some(pool)
    } else {
        None
    };

    let store: Arc<dyn VerificationStore> = match (otp.store, &database) {
        (StoreBackend::Mysql, Some(pool)) => {
            Arc::new(MySqlVerificationStore::new(pool.get_pool().clone()))
        }
        (StoreBackend::Redis, _) => {
            let client = RedisClient::new(&config.cache).await?;
            Arc::new(RedisVerificationStore::new(
                client,
                config.cache.key_prefix.clone(),
                otp.expired_retention_seconds,
            ))
        }
        _ => Arc::new(InMemoryVerificationStore::new()),
    };

    let accounts: Arc<dyn AccountRepository> = match (otp.account_store, &database) {
        (StoreBackend::Mysql, Some(pool)) => {
            Arc::new(MySqlAccountRepository::new(pool.get_pool().clone()))
        }
        (StoreBackend::Redis, _) => {
            return Err(InfrastructureError::Config(
                "Redis cannot hold accounts; use memory or mysql".to_string(),
            ))
        }
        _ => Arc::new(InMemoryAccountRepository::new()),
    };

    let gateway = create_delivery_gateway(&config.delivery, config.environment)?;

    info!(
        verification_store = %otp.store,
        account_store = %otp.account_store,
        delivery = gateway.provider_name(),
        "Backends ready"
    );

    Ok(Backends {
        accounts,
        store,
        gateway,
        database,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jt_core::domain::entities::{PendingVerification, Purpose};

    #[tokio::test]
    async fn test_default_config_uses_in_memory_backends() {
        let backends = build_backends(&AppConfig::default()).await.unwrap();

        assert!(backends.database.is_none());
        assert_eq!(backends.gateway.provider_name(), "log");

        let entry = PendingVerification::issue("a@x.com".into(), "123456".into(), Purpose::Signup, 10);
        backends.store.put(entry).await.unwrap();
        assert!(backends.store.get("a@x.com", Purpose::Signup).await.unwrap().is_some());
        assert!(!backends.accounts.exists_by_identifier("a@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_redis_account_store_is_rejected() {
        let mut config = AppConfig::default();
        config.otp.account_store = StoreBackend::Redis;

        let result = build_backends(&config).await;
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }
}
