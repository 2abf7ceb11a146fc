pub mod account;
pub mod verification;

pub use account::{AccountRepository, InMemoryAccountRepository};
pub use verification::{InMemoryVerificationStore, VerificationStore};
