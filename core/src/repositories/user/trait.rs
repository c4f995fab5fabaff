//! User repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Emails are stored lowercase; callers normalize before lookup.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(user))` when the account exists
    /// * `Ok(None)` when no account has this id
    /// * `Err(DomainError)` if the lookup fails
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by their login email (already normalized to lowercase)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find the user holding a pending verification token
    ///
    /// Tokens are single use, so at most one account can hold a given value.
    async fn find_by_verification_token(&self, token: &str)
        -> Result<Option<User>, DomainError>;

    /// Persist a new account
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    /// Persist changes to an existing account
    async fn update(&self, user: &User) -> Result<(), DomainError>;
}
