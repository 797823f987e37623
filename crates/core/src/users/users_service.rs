use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::password::{hash_password, validate_password_policy, verify_password};
use super::users_model::{validate_username, NewUser, RegisterUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{DatabaseError, Error, Result, UserError, ValidationError};

/// Service for registering and authenticating users.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    starting_cash: Decimal,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>, starting_cash: Decimal) -> Self {
        Self {
            repository,
            starting_cash,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, form: RegisterUser) -> Result<User> {
        let (Some(username), Some(password), Some(confirmation)) = (
            non_blank(form.username.as_deref()),
            non_blank(form.password.as_deref()),
            non_blank(form.confirmation.as_deref()),
        ) else {
            return Err(ValidationError::MissingField("all fields".to_string()).into());
        };

        let username = username.trim().to_string();
        validate_username(&username)?;

        if password != confirmation {
            return Err(Error::invalid_input("passwords do not match"));
        }
        validate_password_policy(password)?;

        let new_user = NewUser {
            username: username.clone(),
            password_hash: hash_password(password)?,
            cash: self.starting_cash,
        };

        match self.repository.create(new_user).await {
            Ok(user) => {
                info!("Registered user {} (id {})", user.username, user.id);
                Ok(user)
            }
            Err(Error::Database(DatabaseError::UniqueViolation(_))) => {
                debug!("Registration rejected, username {} is taken", username);
                Err(UserError::DuplicateUsername(username).into())
            }
            Err(e) => Err(e),
        }
    }

    fn authenticate(&self, username: Option<&str>, password: Option<&str>) -> Result<User> {
        let (Some(username), Some(password)) = (non_blank(username), non_blank(password)) else {
            return Err(UserError::AuthenticationFailure.into());
        };

        let Some(user) = self.repository.get_by_username(username.trim())? else {
            return Err(UserError::AuthenticationFailure.into());
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(UserError::AuthenticationFailure.into());
        }

        Ok(user)
    }

    fn get_user(&self, user_id: i32) -> Result<User> {
        self.repository.get_by_id(user_id)
    }
}
