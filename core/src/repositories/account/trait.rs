//! Account repository trait defining the interface for account persistence.
//!
//! Implementations live next to their storage: an in-memory map in this
//! crate, MySQL in the infrastructure crate.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Account;
use crate::errors::DomainError;

/// Repository trait for Account persistence operations
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its normalized email address
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with that identifier
    /// * `Err(DomainError)` - Storage error
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find an account by mobile number (exact match on the stored value)
    async fn find_by_mobile(&self, mobile: &str) -> Result<Option<Account>, DomainError>;

    /// Persist a new account
    ///
    /// # Errors
    /// * `AuthError::AccountAlreadyExists` if the identifier is taken
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Overwrite an existing account
    ///
    /// # Errors
    /// * `DomainError::NotFound` if no account has this ID
    async fn update(&self, account: Account) -> Result<Account, DomainError>;

    /// Check whether an account exists for the identifier
    async fn exists_by_identifier(&self, identifier: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_identifier(identifier).await?.is_some())
    }
}
