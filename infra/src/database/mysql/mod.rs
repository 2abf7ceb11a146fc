//! MySQL implementations of the core repository and store traits

pub mod account_repository_impl;
pub mod verification_store_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use verification_store_impl::MySqlVerificationStore;

use jt_core::errors::DomainError;

/// Wrap an SQLx failure with what was being attempted
pub(crate) fn query_error(context: &str, err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "{}", context);
    DomainError::internal(format!("{}: {}", context, err))
}

/// Whether the error is a duplicate-key violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
