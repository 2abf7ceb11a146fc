//! Session token module
//!
//! Signs and verifies the stateless HS256 tokens returned after a
//! successful verification.

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::SessionTokenService;
