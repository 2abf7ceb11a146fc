//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management
//! - Table bootstrap for accounts and pending codes
//! - Repository and store implementations

pub mod connection;
pub mod mysql;
pub mod schema;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{MySqlAccountRepository, MySqlVerificationStore};
