//! Integration test: core services wired from config-selected backends

use std::sync::Arc;

use jt_core::domain::entities::Purpose;
use jt_core::errors::{AuthError, DomainError};
use jt_core::services::auth::{AuthService, AuthServiceConfig};
use jt_core::services::token::SessionTokenService;
use jt_core::services::verification::{VerificationService, VerificationServiceConfig};
use jt_infra::build_backends;
use jt_infra::delivery::LogDeliveryGateway;
use jt_shared::config::AppConfig;

#[tokio::test]
async fn test_login_request_against_configured_backends() {
    let config = AppConfig::default();
    let backends = build_backends(&config).await.unwrap();

    let verification = Arc::new(VerificationService::new(
        backends.store.clone(),
        backends.gateway.clone(),
        VerificationServiceConfig::from(&config.otp),
    ));
    let tokens = Arc::new(SessionTokenService::new((&config.jwt).into()));
    let service = AuthService::new(
        backends.accounts.clone(),
        verification,
        tokens,
        AuthServiceConfig::default(),
    );

    let result = service.request_code("nobody@x.com", Purpose::Login).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountNotFound))
    ));

    let issued = service.request_code("new@x.com", Purpose::Signup).await.unwrap();
    assert_eq!(issued.identifier, "new@x.com");
    assert!(backends.store.get("new@x.com", Purpose::Signup).await.unwrap().is_some());
}

#[tokio::test]
async fn test_failed_delivery_leaves_no_code_behind() {
    let config = AppConfig::default();
    let backends = build_backends(&config).await.unwrap();
    let gateway = Arc::new(LogDeliveryGateway::failing());

    let verification = VerificationService::new(
        backends.store.clone(),
        gateway.clone(),
        VerificationServiceConfig::from(&config.otp),
    );

    let result = verification.request_code("a@x.com", Purpose::Signup).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DeliveryFailed { .. }))
    ));
    assert!(backends.store.get("a@x.com", Purpose::Signup).await.unwrap().is_none());
    assert_eq!(gateway.message_count(), 0);
}
