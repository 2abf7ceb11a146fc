//! Value objects representing immutable domain concepts.

pub mod account_attributes;
pub mod auth_outcome;

// Re-export commonly used types
pub use account_attributes::{AccountAttributes, SignupProfile};
pub use auth_outcome::{AccountCheck, AccountView, AuthOutcome, MatchedField};
