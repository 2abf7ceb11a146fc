//! Route handlers
//!
//! - `otp`: code request and verification
//! - `accounts`: existence check and the current session's account
//! - `health`: liveness check

pub mod accounts;
pub mod health;
pub mod otp;

use std::sync::Arc;

use jt_core::repositories::{AccountRepository, VerificationStore};
use jt_core::services::auth::AuthService;
use jt_core::services::verification::DeliveryGateway;
use jt_shared::config::Environment;

/// Shared state for every handler
pub struct AppState<A, S, G>
where
    A: AccountRepository + ?Sized,
    S: VerificationStore + ?Sized,
    G: DeliveryGateway + ?Sized,
{
    pub auth_service: Arc<AuthService<A, S, G>>,
    pub environment: Environment,
}

impl<A, S, G> AppState<A, S, G>
where
    A: AccountRepository + ?Sized,
    S: VerificationStore + ?Sized,
    G: DeliveryGateway + ?Sized,
{
    pub fn new(auth_service: Arc<AuthService<A, S, G>>, environment: Environment) -> Self {
        Self {
            auth_service,
            environment,
        }
    }
}
