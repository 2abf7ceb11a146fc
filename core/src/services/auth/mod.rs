//! Authentication service module
//!
//! This module provides the account side of the one-time code flow:
//! - Account existence pre-checks before a code is issued
//! - Signup, login and password reset completion after verification
//! - Session token issuance
//! - Account lookups for check-user and the current session

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
