//! Verification service module for one-time code authentication
//!
//! This module provides the complete code workflow:
//! - Code generation from the OS CSPRNG
//! - Store-then-deliver with rollback on delivery failure or timeout
//! - Constant-time verification with lazy expiry and single use
//! - Server-side resend cooldown
//! - Background sweeping of expired codes

mod code_generator;
mod config;
mod identifier;
mod message;
mod service;
mod sweeper;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use code_generator::{CodeGenerator, RandomCodeGenerator};
pub use config::VerificationServiceConfig;
pub use identifier::normalize_identifier;
pub use message::{MessageKind, OutboundMessage};
pub use service::VerificationService;
pub use sweeper::{ExpiredCodeSweeper, SweeperConfig};
pub use traits::DeliveryGateway;
pub use types::IssuedCode;
