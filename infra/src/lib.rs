//! # Infrastructure Layer
//!
//! Concrete backends for the Jharkhand Tourism core:
//!
//! - **Database**: MySQL account repository and verification store using SQLx
//! - **Cache**: Redis verification store with key expiry
//! - **Delivery**: email API gateway (reqwest) and a logging gateway for development
//! - **Backends**: runtime selection of the above from `AppConfig`

use jt_core::errors::DomainError;

pub mod backends;
pub mod cache;
pub mod database;
pub mod delivery;

pub use backends::{build_backends, Backends};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Message delivery error
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Stored data could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_error_maps_to_internal() {
        let err: DomainError = InfrastructureError::Config("bad url".to_string()).into();
        match err {
            DomainError::Internal { message } => {
                assert_eq!(message, "Configuration error: bad url");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
