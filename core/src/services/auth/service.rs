//! Session issuer: drives code request and verification, then creates or
//! updates the account and issues a session token

use std::sync::Arc;
use std::time::Duration;

use jt_shared::utils::{mask_email, normalize_email, normalize_mobile};

use crate::domain::entities::{Account, Purpose, SessionClaims, VerifyOutcome};
use crate::domain::value_objects::{
    AccountAttributes, AccountCheck, AccountView, AuthOutcome, MatchedField, SignupProfile,
};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::{AccountRepository, VerificationStore};
use crate::services::token::SessionTokenService;
use crate::services::verification::{
    normalize_identifier, DeliveryGateway, IssuedCode, VerificationService,
};

use super::config::AuthServiceConfig;
use super::password::hash_password;

/// bcrypt ignores input past this many bytes
const MAX_PASSWORD_BYTES: usize = 72;

/// What to do once a code has been accepted
enum Completion {
    Signup(SignupProfile),
    Login,
    PasswordReset(String),
}

/// Authentication service for the complete one-time code flow
pub struct AuthService<A, S, G>
where
    A: AccountRepository + ?Sized,
    S: VerificationStore + ?Sized,
    G: DeliveryGateway + ?Sized,
{
    accounts: Arc<A>,
    verification: Arc<VerificationService<S, G>>,
    tokens: Arc<SessionTokenService>,
    config: AuthServiceConfig,
}

impl<A, S, G> AuthService<A, S, G>
where
    A: AccountRepository + ?Sized,
    S: VerificationStore + ?Sized,
    G: DeliveryGateway + ?Sized,
{
    pub fn new(
        accounts: Arc<A>,
        verification: Arc<VerificationService<S, G>>,
        tokens: Arc<SessionTokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            accounts,
            verification,
            tokens,
            config,
        }
    }

    pub fn verification(&self) -> &Arc<VerificationService<S, G>> {
        &self.verification
    }

    pub fn tokens(&self) -> &Arc<SessionTokenService> {
        &self.tokens
    }

    /// Request a code for `identifier`
    ///
    /// This method:
    /// 1. Normalizes and validates the identifier
    /// 2. Checks that an account exists (login, reset) or does not (signup)
    /// 3. Delegates issue and delivery to the verification service
    ///
    /// The existence check is best-effort: a repository failure is logged
    /// and the request proceeds.
    pub async fn request_code(&self, identifier: &str, purpose: Purpose) -> DomainResult<IssuedCode> {
        let identifier = normalize_identifier(identifier)?;

        match self.accounts.exists_by_identifier(&identifier).await {
            Ok(exists) => match (purpose, exists) {
                (Purpose::Signup, true) => {
                    return Err(AuthError::AccountAlreadyExists.into());
                }
                (Purpose::Login | Purpose::PasswordReset, false) => {
                    return Err(AuthError::AccountNotFound.into());
                }
                _ => {}
            },
            Err(e) => {
                tracing::warn!(
                    identifier = %mask_email(&identifier),
                    error = %e,
                    event = "account_precheck_failed",
                    "Account lookup failed, issuing code anyway"
                );
            }
        }

        self.verification.request_code(&identifier, purpose).await
    }

    /// Verify a code and complete the flow for its purpose
    ///
    /// Input is validated before the code is checked, so a request with
    /// missing signup fields does not consume the code. A signup that
    /// conflicts with an existing account fails after the code is consumed,
    /// so the code is burned and a new one must be requested.
    pub async fn verify_and_complete(
        &self,
        identifier: &str,
        purpose: Purpose,
        code: &str,
        attributes: Option<&AccountAttributes>,
    ) -> DomainResult<AuthOutcome> {
        let identifier = normalize_identifier(identifier)?;
        if code.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "code".to_string(),
            }
            .into());
        }

        let completion = match purpose {
            Purpose::Signup => {
                let profile = attributes
                    .ok_or_else(|| ValidationError::RequiredField {
                        field: "accountAttributes".to_string(),
                    })?
                    .to_signup_profile()?;
                self.check_password(&profile.password)?;
                Completion::Signup(profile)
            }
            Purpose::Login => Completion::Login,
            Purpose::PasswordReset => {
                let password = attributes
                    .ok_or_else(|| ValidationError::RequiredField {
                        field: "accountAttributes".to_string(),
                    })?
                    .new_password()?;
                self.check_password(password)?;
                Completion::PasswordReset(password.to_string())
            }
        };

        if let VerifyOutcome::Rejected(reason) =
            self.verification.verify(&identifier, purpose, code).await?
        {
            return Err(AuthError::from(reason).into());
        }

        match completion {
            Completion::Signup(profile) => self.complete_signup(&identifier, profile).await,
            Completion::Login => self.complete_login(&identifier).await,
            Completion::PasswordReset(password) => {
                self.complete_password_reset(&identifier, password).await
            }
        }
    }

    /// Minimum counted in characters, maximum in bytes (bcrypt's input limit)
    fn check_password(&self, password: &str) -> Result<(), ValidationError> {
        if password.chars().count() < self.config.min_password_length
            || password.len() > MAX_PASSWORD_BYTES
        {
            return Err(ValidationError::InvalidLength {
                field: "password".to_string(),
                min: self.config.min_password_length,
                max: MAX_PASSWORD_BYTES,
            });
        }
        Ok(())
    }

    /// Create a verified account and issue its first token
    ///
    /// Callers must have verified a signup code for `identifier`.
    pub async fn complete_signup(
        &self,
        identifier: &str,
        profile: SignupProfile,
    ) -> DomainResult<AuthOutcome> {
        if self.accounts.exists_by_identifier(identifier).await? {
            return Err(AuthError::AccountAlreadyExists.into());
        }

        let secret_hash = hash_password(profile.password, self.config.password_hash_cost).await?;

        let mut account = Account::new(
            identifier.to_string(),
            secret_hash,
            profile.name,
            profile.role,
            profile.attributes,
        )
        .with_mobile(profile.mobile);
        account.mark_verified();

        let account = self.accounts.create(account).await?;
        let token = self.tokens.issue(&account)?;

        tracing::info!(
            account_id = %account.id,
            role = %account.role,
            event = "account_created",
            "Account created after signup verification"
        );

        if self.config.send_welcome_message {
            self.send_welcome(&account).await;
        }

        Ok(AuthOutcome::new(&account, token))
    }

    /// Best-effort greeting; failures are logged and swallowed
    async fn send_welcome(&self, account: &Account) {
        let timeout = Duration::from_secs(self.verification.config().delivery_timeout_seconds);
        let gateway = self.verification.gateway();
        let result = tokio::time::timeout(
            timeout,
            gateway.send_welcome(&account.identifier, &account.name),
        )
        .await;

        let failure = match result {
            Ok(Ok(_)) => return,
            Ok(Err(reason)) => reason,
            Err(_) => "timed out".to_string(),
        };
        tracing::warn!(
            identifier = %mask_email(&account.identifier),
            provider = gateway.provider_name(),
            reason = %failure,
            event = "welcome_delivery_failed",
            "Welcome message could not be sent"
        );
    }

    /// Issue a token for an existing account, marking it verified
    ///
    /// Callers must have verified a login code for `identifier`.
    pub async fn complete_login(&self, identifier: &str) -> DomainResult<AuthOutcome> {
        let mut account = self
            .accounts
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if account.mark_verified() {
            account = self.accounts.update(account).await?;
        }

        let token = self.tokens.issue(&account)?;

        tracing::info!(
            account_id = %account.id,
            event = "login_succeeded",
            "Session issued after login verification"
        );

        Ok(AuthOutcome::new(&account, token))
    }

    /// Replace the account secret and issue a token
    ///
    /// Callers must have verified a password reset code for `identifier`.
    pub async fn complete_password_reset(
        &self,
        identifier: &str,
        new_password: String,
    ) -> DomainResult<AuthOutcome> {
        let mut account = self
            .accounts
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let secret_hash = hash_password(new_password, self.config.password_hash_cost).await?;
        account.set_secret_hash(secret_hash);
        account.mark_verified();

        let account = self.accounts.update(account).await?;
        let token = self.tokens.issue(&account)?;

        tracing::info!(
            account_id = %account.id,
            event = "password_reset",
            "Password reset after verification"
        );

        Ok(AuthOutcome::new(&account, token))
    }

    /// Check whether an account exists for an email and/or mobile number
    pub async fn check_account(
        &self,
        email: Option<&str>,
        mobile: Option<&str>,
    ) -> DomainResult<AccountCheck> {
        let email = email.map(normalize_email).filter(|e| !e.is_empty());
        let mobile = mobile.map(normalize_mobile).filter(|m| !m.is_empty());

        if email.is_none() && mobile.is_none() {
            return Err(ValidationError::RequiredField {
                field: "email or mobile".to_string(),
            }
            .into());
        }

        let email_hit = match &email {
            Some(email) => self.accounts.find_by_identifier(email).await?.is_some(),
            None => false,
        };
        let mobile_hit = match &mobile {
            Some(mobile) => self.accounts.find_by_mobile(mobile).await?.is_some(),
            None => false,
        };

        let matched = match (email_hit, mobile_hit) {
            (true, true) => Some(MatchedField::Both),
            (true, false) => Some(MatchedField::Email),
            (false, true) => Some(MatchedField::Mobile),
            (false, false) => None,
        };

        Ok(AccountCheck { matched })
    }

    /// Load the account behind a verified session token
    pub async fn current_account(&self, claims: &SessionClaims) -> DomainResult<AccountView> {
        let id = claims
            .account_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;

        let account = self
            .accounts
            .find_by_id(id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        Ok(AccountView::from(&account))
    }
}
