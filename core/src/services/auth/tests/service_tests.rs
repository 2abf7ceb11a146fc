//! Unit tests for authentication service

use serde_json::json;

use crate::domain::entities::{Account, PendingVerification, Purpose, Role, RoleAttributes};
use crate::domain::value_objects::{AccountAttributes, MatchedField};
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::{AccountRepository, InMemoryAccountRepository, VerificationStore};
use crate::services::auth::password::verify_password;
use crate::services::verification::MessageKind;

use super::mocks::{harness, harness_with, Harness, UnavailableAccountRepository};

fn signup_attributes(role: &str) -> AccountAttributes {
    serde_json::from_value(json!({
        "name": "Asha Kumari",
        "password": "hundru-falls",
        "role": role,
        "mobile": "+91 98765 43210",
        "hotelName": "Patratu Lake Resort",
        "hotelType": "resort"
    }))
    .unwrap()
}

async fn seed_account(harness: &Harness<InMemoryAccountRepository>, identifier: &str) -> Account {
    let account = Account::new(
        identifier.to_string(),
        "$2b$04$seededhash".to_string(),
        "Existing".to_string(),
        Role::Tourist,
        RoleAttributes::default(),
    )
    .with_mobile(Some("9123456789".to_string()));
    harness.accounts.create(account).await.unwrap()
}

async fn issue_code<A: AccountRepository>(harness: &Harness<A>, identifier: &str, purpose: Purpose) -> String {
    harness.service.request_code(identifier, purpose).await.unwrap();
    harness
        .store
        .get(identifier, purpose)
        .await
        .unwrap()
        .expect("pending entry")
        .code
}

#[tokio::test]
async fn test_request_code_rejects_invalid_identifier() {
    let harness = harness_with(UnavailableAccountRepository);

    let result = harness.service.request_code("no-at-sign", Purpose::Signup).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidIdentifier { .. }))
    ));
    assert!(harness.store.is_empty().await);
}

#[tokio::test]
async fn test_signup_request_conflicts_with_existing_account() {
    let harness = harness();
    seed_account(&harness, "a@x.com").await;

    let result = harness.service.request_code("A@X.com", Purpose::Signup).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountAlreadyExists))
    ));
    assert_eq!(harness.gateway.sent_count(), 0);
}

#[tokio::test]
async fn test_login_and_reset_requests_need_an_account() {
    let harness = harness();

    for purpose in [Purpose::Login, Purpose::PasswordReset] {
        let result = harness.service.request_code("ghost@x.com", purpose).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::AccountNotFound))
        ));
    }
    assert!(harness.store.is_empty().await);
}

#[tokio::test]
async fn test_precheck_failure_does_not_block_request() {
    let harness = harness_with(UnavailableAccountRepository);

    let issued = harness
        .service
        .request_code("a@x.com", Purpose::Login)
        .await
        .unwrap();

    assert_eq!(issued.identifier, "a@x.com");
    assert_eq!(harness.gateway.sent_count(), 1);
}

#[tokio::test]
async fn test_signup_creates_verified_account_with_token() {
    let harness = harness();
    let code = issue_code(&harness, "a@x.com", Purpose::Signup).await;

    let outcome = harness
        .service
        .verify_and_complete(
            "a@x.com",
            Purpose::Signup,
            &code,
            Some(&signup_attributes("hotel_provider")),
        )
        .await
        .unwrap();

    assert!(!outcome.token.is_empty());
    assert!(outcome.account.is_verified);
    assert_eq!(outcome.account.role, Role::HotelProvider);
    assert_eq!(outcome.account.mobile.as_deref(), Some("+919876543210"));
    assert_eq!(
        outcome.account.attributes.get("hotelName"),
        Some(&json!("Patratu Lake Resort"))
    );

    let claims = harness.tokens.verify(&outcome.token).unwrap();
    assert_eq!(claims.account_id().unwrap(), outcome.account.id);

    let stored = harness
        .accounts
        .find_by_identifier("a@x.com")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.is_verified);
    assert!(verify_password("hundru-falls".to_string(), stored.secret_hash)
        .await
        .unwrap());

    // Code consumed, welcome sent
    assert!(harness.store.is_empty().await);
    assert_eq!(harness.gateway.sent_of_kind(MessageKind::Welcome).len(), 1);
}

#[tokio::test]
async fn test_signup_requires_profile_before_consuming_code() {
    let harness = harness();
    let code = issue_code(&harness, "a@x.com", Purpose::Signup).await;

    let result = harness
        .service
        .verify_and_complete("a@x.com", Purpose::Signup, &code, None)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))
    ));

    let short_password = AccountAttributes {
        password: Some("short".to_string()),
        ..signup_attributes("tourist")
    };
    let result = harness
        .service
        .verify_and_complete("a@x.com", Purpose::Signup, &code, Some(&short_password))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidLength { .. }))
    ));

    // Still pending
    assert!(harness.store.get("a@x.com", Purpose::Signup).await.unwrap().is_some());
}

#[tokio::test]
async fn test_signup_for_existing_account_conflicts_without_mutation() {
    let harness = harness();
    // Code issued before the account appeared
    let code = issue_code(&harness, "a@x.com", Purpose::Signup).await;
    let existing = seed_account(&harness, "a@x.com").await;

    let result = harness
        .service
        .verify_and_complete(
            "a@x.com",
            Purpose::Signup,
            &code,
            Some(&signup_attributes("tourist")),
        )
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountAlreadyExists))
    ));
    let stored = harness.accounts.find_by_id(existing.id).await.unwrap().unwrap();
    assert_eq!(stored, existing);
    assert_eq!(harness.accounts.count().await, 1);

    // The conflicting attempt burned the code
    assert!(harness.store.get("a@x.com", Purpose::Signup).await.unwrap().is_none());
}

#[tokio::test]
async fn test_password_limit_counts_bytes() {
    let harness = harness();
    let code = issue_code(&harness, "a@x.com", Purpose::Signup).await;

    // 30 characters, 90 bytes in UTF-8
    let multibyte = AccountAttributes {
        password: Some("झार".repeat(10)),
        ..signup_attributes("tourist")
    };
    let result = harness
        .service
        .verify_and_complete("a@x.com", Purpose::Signup, &code, Some(&multibyte))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidLength { max: 72, .. }))
    ));
    assert!(harness.store.get("a@x.com", Purpose::Signup).await.unwrap().is_some());

    // 24 characters, exactly 72 bytes
    let at_limit = AccountAttributes {
        password: Some("झार".repeat(8)),
        ..signup_attributes("tourist")
    };
    let outcome = harness
        .service
        .verify_and_complete("a@x.com", Purpose::Signup, &code, Some(&at_limit))
        .await
        .unwrap();
    assert_eq!(outcome.account.identifier, "a@x.com");
}

#[tokio::test]
async fn test_wrong_code_is_rejected() {
    let harness = harness();
    let code = issue_code(&harness, "a@x.com", Purpose::Signup).await;
    let wrong = if code == "999999" { "100000" } else { "999999" };

    let result = harness
        .service
        .verify_and_complete(
            "a@x.com",
            Purpose::Signup,
            wrong,
            Some(&signup_attributes("tourist")),
        )
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidVerificationCode))
    ));
    assert_eq!(harness.accounts.count().await, 0);
}

#[tokio::test]
async fn test_login_marks_account_verified() {
    let harness = harness();
    let existing = seed_account(&harness, "a@x.com").await;
    assert!(!existing.is_verified);
    let code = issue_code(&harness, "a@x.com", Purpose::Login).await;

    let outcome = harness
        .service
        .verify_and_complete("a@x.com", Purpose::Login, &code, None)
        .await
        .unwrap();

    assert_eq!(outcome.account.id, existing.id);
    assert!(outcome.account.is_verified);
    assert!(harness
        .accounts
        .find_by_id(existing.id)
        .await
        .unwrap()
        .unwrap()
        .is_verified);
}

#[tokio::test]
async fn test_login_for_unknown_account_returns_not_found() {
    let harness = harness();
    // A login code whose account no longer exists
    harness
        .store
        .put(PendingVerification::issue(
            "ghost@x.com".to_string(),
            "246810".to_string(),
            Purpose::Login,
            10,
        ))
        .await
        .unwrap();

    let result = harness
        .service
        .verify_and_complete("ghost@x.com", Purpose::Login, "246810", None)
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountNotFound))
    ));
    assert_eq!(harness.accounts.count().await, 0);
}

#[tokio::test]
async fn test_password_reset_replaces_secret() {
    let harness = harness();
    let existing = seed_account(&harness, "a@x.com").await;
    let code = issue_code(&harness, "a@x.com", Purpose::PasswordReset).await;

    let attributes = AccountAttributes {
        password: Some("betla-national-park".to_string()),
        ..Default::default()
    };
    let outcome = harness
        .service
        .verify_and_complete("a@x.com", Purpose::PasswordReset, &code, Some(&attributes))
        .await
        .unwrap();

    assert!(!outcome.token.is_empty());
    let stored = harness.accounts.find_by_id(existing.id).await.unwrap().unwrap();
    assert_ne!(stored.secret_hash, existing.secret_hash);
    assert!(verify_password("betla-national-park".to_string(), stored.secret_hash)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_password_reset_requires_new_password() {
    let harness = harness();
    seed_account(&harness, "a@x.com").await;
    let code = issue_code(&harness, "a@x.com", Purpose::PasswordReset).await;

    let result = harness
        .service
        .verify_and_complete(
            "a@x.com",
            Purpose::PasswordReset,
            &code,
            Some(&AccountAttributes::default()),
        )
        .await;

    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))
    ));
}

#[tokio::test]
async fn test_welcome_failure_is_not_surfaced() {
    let harness = harness();
    let code = issue_code(&harness, "a@x.com", Purpose::Signup).await;
    harness.gateway.set_failure(true);

    let outcome = harness
        .service
        .verify_and_complete(
            "a@x.com",
            Purpose::Signup,
            &code,
            Some(&signup_attributes("tourist")),
        )
        .await;

    assert!(outcome.is_ok());
    assert_eq!(harness.accounts.count().await, 1);
}

#[tokio::test]
async fn test_check_account() {
    let harness = harness();
    seed_account(&harness, "a@x.com").await;

    let check = harness
        .service
        .check_account(Some(" A@x.com"), None)
        .await
        .unwrap();
    assert_eq!(check.matched, Some(MatchedField::Email));
    assert_eq!(check.message(), "User already exists with this email address");

    let check = harness
        .service
        .check_account(Some("a@x.com"), Some("91234 56789"))
        .await
        .unwrap();
    assert_eq!(check.matched, Some(MatchedField::Both));

    let check = harness
        .service
        .check_account(None, Some("9123456789"))
        .await
        .unwrap();
    assert_eq!(check.matched, Some(MatchedField::Mobile));

    let check = harness
        .service
        .check_account(Some("new@x.com"), None)
        .await
        .unwrap();
    assert!(!check.exists());

    assert!(matches!(
        harness.service.check_account(None, Some("  ")).await,
        Err(DomainError::ValidationErr(_))
    ));
}

#[tokio::test]
async fn test_current_account() {
    let harness = harness();
    let existing = seed_account(&harness, "a@x.com").await;
    let token = harness.tokens.issue(&existing).unwrap();
    let claims = harness.tokens.verify(&token).unwrap();

    let view = harness.service.current_account(&claims).await.unwrap();
    assert_eq!(view.id, existing.id);
    assert_eq!(view.identifier, "a@x.com");

    let ghost = Account::new(
        "ghost@x.com".to_string(),
        "hash".to_string(),
        "Ghost".to_string(),
        Role::Admin,
        RoleAttributes::default(),
    );
    let claims = harness.tokens.verify(&harness.tokens.issue(&ghost).unwrap()).unwrap();
    assert!(matches!(
        harness.service.current_account(&claims).await,
        Err(DomainError::Auth(AuthError::AccountNotFound))
    ));
}
