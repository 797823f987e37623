//! User repository and service traits.
//!
//! These traits define the contract for user operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::users_model::{NewUser, RegisterUser, User};
use crate::errors::Result;

/// Trait defining the contract for User repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Creates a new user.
    ///
    /// A username that is already taken must surface as
    /// `DatabaseError::UniqueViolation`.
    async fn create(&self, new_user: NewUser) -> Result<User>;

    /// Retrieves a user by its ID.
    fn get_by_id(&self, user_id: i32) -> Result<User>;

    /// Retrieves a user by username, if one exists.
    fn get_by_username(&self, username: &str) -> Result<Option<User>>;
}

/// Trait defining the contract for User service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Validates the registration form and creates the user with the
    /// starting cash balance.
    async fn register(&self, form: RegisterUser) -> Result<User>;

    /// Checks credentials and returns the matching user.
    fn authenticate(&self, username: Option<&str>, password: Option<&str>) -> Result<User>;

    /// Retrieves a user by ID.
    fn get_user(&self, user_id: i32) -> Result<User>;
}
