use async_trait::async_trait;

use crate::domain::errors::StoreError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated names, email and plaintext password
    ///
    /// # Returns
    /// Created user entity carrying its store-assigned id
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `PasswordHashing` - Digest could not be computed
    /// * `Store` - Store operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Store` - Store operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve every user.
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Overwrite the names present in `command`.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Store` - Store operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand) -> Result<(), UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Store` - Store operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for the `users` collection.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user and return it with its assigned id.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - No user with this id
    async fn find_by_id(&self, id: &UserId) -> Result<User, StoreError>;

    /// Retrieve user by email address, `None` when absent.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StoreError>;

    /// Retrieve all users in insertion order.
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    /// Apply the fields present in `changes`.
    ///
    /// # Errors
    /// * `NotFound` - No user with this id
    async fn update_by_id(&self, id: &UserId, changes: &UpdateUserCommand)
        -> Result<(), StoreError>;

    /// # Errors
    /// * `NotFound` - No user with this id
    async fn delete_by_id(&self, id: &UserId) -> Result<(), StoreError>;

    /// Remove every user record.
    async fn drop_all(&self) -> Result<(), StoreError>;
}
