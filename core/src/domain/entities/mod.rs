//! Domain entities representing core business objects.

pub mod account;
pub mod pending_verification;
pub mod session;

mod outcome;

// Re-export commonly used types
pub use account::{Account, Role, RoleAttributes};
pub use outcome::{RejectReason, VerifyOutcome};
pub use pending_verification::{
    PendingVerification, Purpose, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES,
};
pub use session::{SessionClaims, SESSION_EXPIRY_DAYS, SESSION_ISSUER};
