//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;

use jt_api::AppState;
use jt_core::domain::entities::{Account, Purpose, Role, RoleAttributes};
use jt_core::repositories::{
    AccountRepository, InMemoryAccountRepository, InMemoryVerificationStore, VerificationStore,
};
use jt_core::services::auth::{AuthService, AuthServiceConfig};
use jt_core::services::token::{SessionTokenService, TokenServiceConfig};
use jt_core::services::verification::{VerificationService, VerificationServiceConfig};
use jt_infra::delivery::LogDeliveryGateway;
use jt_shared::config::Environment;

pub const TEST_SECRET: &str = "http-test-secret";
pub const MAX_PAYLOAD: usize = 64 * 1024;

pub type TestState = AppState<InMemoryAccountRepository, InMemoryVerificationStore, LogDeliveryGateway>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub tokens: web::Data<SessionTokenService>,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub store: Arc<InMemoryVerificationStore>,
    pub gateway: Arc<LogDeliveryGateway>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_gateway(LogDeliveryGateway::new())
    }

    pub fn with_gateway(gateway: LogDeliveryGateway) -> Self {
        let accounts = Arc::new(InMemoryAccountRepository::new());
        let store = Arc::new(InMemoryVerificationStore::new());
        let gateway = Arc::new(gateway);

        let verification = Arc::new(VerificationService::new(
            store.clone(),
            gateway.clone(),
            VerificationServiceConfig::default(),
        ));
        let tokens = Arc::new(SessionTokenService::new(token_config()));
        let auth_service = Arc::new(AuthService::new(
            accounts.clone(),
            verification,
            tokens.clone(),
            AuthServiceConfig {
                password_hash_cost: 4,
                ..AuthServiceConfig::default()
            },
        ));

        Self {
            state: web::Data::new(AppState::new(auth_service, Environment::Development)),
            tokens: web::Data::from(tokens),
            accounts,
            store,
            gateway,
        }
    }

    /// The code currently stored for `(identifier, purpose)`
    pub async fn stored_code(&self, identifier: &str, purpose: Purpose) -> String {
        self.store
            .get(identifier, purpose)
            .await
            .unwrap()
            .expect("a code should be stored")
            .code
    }

    pub async fn seed_account(&self, identifier: &str, mobile: Option<&str>) -> Account {
        let mut account = Account::new(
            identifier.to_string(),
            "$2b$04$placeholderplaceholderplaceholderplaceholderpla".to_string(),
            "Seeded Tourist".to_string(),
            Role::Tourist,
            RoleAttributes::default(),
        )
        .with_mobile(mobile.map(str::to_string));
        account.mark_verified();
        self.accounts.create(account).await.unwrap()
    }
}

pub fn token_config() -> TokenServiceConfig {
    TokenServiceConfig {
        jwt_secret: TEST_SECRET.to_string(),
        ..TokenServiceConfig::default()
    }
}
