//! Shared utilities and common types for the Jharkhand Tourism server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structure
//! - Utility functions (email validation, masking)
//! - Common response types

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, ConfigError, CorsConfig, DatabaseConfig, DeliveryConfig,
    DeliveryProvider, Environment, JwtConfig, LogFormat, LoggingConfig, OtpConfig,
    ServerConfig, StoreBackend,
};
pub use errors::ErrorResponse;
pub use types::HealthResponse;
pub use utils::{email, validation};
