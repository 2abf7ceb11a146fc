//! # Jharkhand Tourism Core
//!
//! Core business logic and domain layer for the Jharkhand Tourism backend.
//! This crate contains domain entities, the one-time code verification
//! engine, session issuance, repository and store interfaces with in-memory
//! backends, and the error types shared by the outer layers.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
