//! Bearer-token authentication for protected endpoints.
//!
//! `AuthContext` is an extractor: it reads `Authorization: Bearer <token>`
//! and verifies it with the `SessionTokenService` registered as app data.

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use jt_core::domain::entities::{Role, SessionClaims};
use jt_core::errors::{DomainError, TokenError};
use jt_core::services::token::SessionTokenService;

use crate::handlers::ApiError;

/// Authenticated caller, built from verified session claims
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub account_id: Uuid,
    pub role: Role,
    /// Token ID, for log correlation
    pub jti: String,
    pub claims: SessionClaims,
}

impl AuthContext {
    pub fn from_claims(claims: SessionClaims) -> Result<Self, DomainError> {
        let account_id = claims
            .account_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;
        Ok(Self {
            account_id,
            role: claims.role,
            jti: claims.jti.clone(),
            claims,
        })
    }
}

/// Extract the token from an `Authorization: Bearer` header
pub(crate) fn extract_bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn authenticate(req: &HttpRequest) -> Result<AuthContext, ApiError> {
    let token = extract_bearer_token(req).ok_or(DomainError::Token(TokenError::MissingToken))?;

    let tokens = req
        .app_data::<web::Data<SessionTokenService>>()
        .ok_or_else(|| DomainError::internal("session token service is not configured"))?;

    let claims = tokens.verify(token)?;
    Ok(AuthContext::from_claims(claims)?)
}

impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = authenticate(req);
        if let Err(err) = &result {
            tracing::debug!(error = %err, "Rejected unauthenticated request");
        }
        ready(result)
    }
}
