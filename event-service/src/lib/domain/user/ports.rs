use async_trait::async_trait;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with validated input.
    ///
    /// Hashes the password and assigns the default role.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `HashingFailed` - Password could not be hashed
    /// * `StoreUnavailable` - Store operation failed or timed out
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `StoreUnavailable` - Store operation failed or timed out
    async fn get_user(&self, id: UserId) -> Result<User, UserError>;

    /// Look up a user by login email. Absence is not an error.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed or timed out
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Apply a coalescing update to an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `HashingFailed` - New password could not be hashed
    /// * `StoreUnavailable` - Store operation failed or timed out
    async fn update_user(&self, id: UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;
}

/// Persistence operations for user aggregate (the credential store).
///
/// Implementations bound every call with a timeout and report expiry as
/// `StoreUnavailable`.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// Assigns the id, forces `verified = false`, and attaches a fresh
    /// verification token expiring in 24 hours. The hash is stored as given.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `StoreUnavailable` - Store operation failed or timed out
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed or timed out
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store operation failed or timed out
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Coalescing update of name and password hash.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `StoreUnavailable` - Store operation failed or timed out
    async fn update(&self, id: UserId, changes: UserChanges) -> Result<User, UserError>;
}
