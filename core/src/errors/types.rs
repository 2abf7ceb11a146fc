//! Error types for authentication, session tokens and input validation
//!
//! The `Display` strings are the human-readable messages surfaced in the
//! `{"error": "..."}` body by the presentation layer.

use thiserror::Error;

use crate::domain::entities::RejectReason;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email address: {identifier}")]
    InvalidIdentifier { identifier: String },

    #[error("No verification code was issued or it was already used")]
    VerificationCodeNotFound,

    #[error("Verification code expired")]
    VerificationCodeExpired,

    #[error("Invalid verification code")]
    InvalidVerificationCode,

    #[error("Please wait {retry_after_seconds} seconds before requesting a new code")]
    ResendCooldown { retry_after_seconds: i64 },

    #[error("Failed to send verification code")]
    DeliveryFailed { reason: String },

    #[error("User not found")]
    AccountNotFound,

    #[error("User already exists")]
    AccountAlreadyExists,
}

impl From<RejectReason> for AuthError {
    fn from(reason: RejectReason) -> Self {
        match reason {
            RejectReason::NotFound => AuthError::VerificationCodeNotFound,
            RejectReason::Expired => AuthError::VerificationCodeExpired,
            RejectReason::Mismatch => AuthError::InvalidVerificationCode,
        }
    }
}

/// Session token errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Session token expired")]
    TokenExpired,

    #[error("Invalid session token")]
    InvalidToken,

    #[error("Missing session token")]
    MissingToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (min: {min}, max: {max})")]
    InvalidLength { field: String, min: usize, max: usize },
}
