//! Stateless HS256 session tokens

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::{Account, SessionClaims};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Issues and verifies session tokens
///
/// Validity is signature, expiry and issuer only; there is no revocation
/// list, so a token stays valid until it expires.
#[derive(Clone)]
pub struct SessionTokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionTokenService {
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issue a token for `account`, valid from now
    pub fn issue(&self, account: &Account) -> Result<String, DomainError> {
        self.issue_at(account, Utc::now())
    }

    /// Issue a token as if it were `now`
    pub fn issue_at(&self, account: &Account, now: DateTime<Utc>) -> Result<String, DomainError> {
        let claims = SessionClaims::for_account(
            account,
            &self.config.issuer,
            self.config.expiry_days,
            now,
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign session token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Verify a token and return its claims
    ///
    /// # Errors
    /// * `TokenError::TokenExpired` - past `exp`
    /// * `TokenError::InvalidToken` - bad signature, issuer, or format
    pub fn verify(&self, token: &str) -> Result<SessionClaims, DomainError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                    DomainError::Token(TokenError::TokenExpired)
                } else {
                    DomainError::Token(TokenError::InvalidToken)
                }
            })?;

        Ok(token_data.claims)
    }
}
