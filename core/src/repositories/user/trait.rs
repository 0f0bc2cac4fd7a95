//! User repository trait defining the interface for user data persistence.
//!
//! Queries take a typed [`UserLookup`] instead of field names, so every
//! predicate the workflow issues is known at compile time.

use async_trait::async_trait;

use crate::domain::entities::user::{User, UserChanges, UserLookup};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use af_core::repositories::UserRepository;
/// use af_core::domain::entities::user::{User, UserChanges, UserLookup};
/// use af_core::errors::DomainError;
///
/// struct NullRepository;
///
/// #[async_trait]
/// impl UserRepository for NullRepository {
///     async fn find(&self, _lookup: &UserLookup) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///
///     async fn create(&self, user: User) -> Result<User, DomainError> {
///         Ok(user)
///     }
///
///     async fn update(&self, _lookup: &UserLookup, _changes: UserChanges) -> Result<u64, DomainError> {
///         Ok(0)
///     }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find the single user matching `lookup`
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user matches
    /// * `Err(DomainError::Upstream)` - Database error occurred
    async fn find(&self, lookup: &UserLookup) -> Result<Option<User>, DomainError>;

    /// Create a new user in the repository
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::UniqueViolation)` - E-mail or username already taken
    /// * `Err(DomainError::Upstream)` - Database error occurred
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Apply `changes` to the user matching `lookup`
    ///
    /// # Returns
    /// * `Ok(n)` - Number of rows changed (0 when nothing matched)
    /// * `Err(DomainError::UniqueViolation)` - New username already taken
    /// * `Err(DomainError::Upstream)` - Database error occurred
    async fn update(&self, lookup: &UserLookup, changes: UserChanges) -> Result<u64, DomainError>;
}
