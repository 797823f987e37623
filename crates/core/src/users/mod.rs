//! Users module - registration, credentials, and the user repository contract.

mod password;
mod users_model;
mod users_service;
mod users_traits;


pub use password::{hash_password, validate_password_policy, verify_password};
pub use users_model::{NewUser, RegisterUser, User};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
