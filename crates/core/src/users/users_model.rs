//! User domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_USERNAME_LEN;
use crate::errors::{Error, Result, ValidationError};

/// Domain model representing a registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub cash: Decimal,
}

/// Registration form as submitted; every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    pub username: Option<String>,
    pub password: Option<String>,
    pub confirmation: Option<String>,
}

/// Input model for persisting a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub cash: Decimal,
}

impl NewUser {
    /// Validates the new user data.
    pub fn validate(&self) -> Result<()> {
        validate_username(&self.username)?;
        if self.password_hash.is_empty() {
            return Err(Error::Unexpected("password hash is empty".to_string()));
        }
        if self.cash.is_sign_negative() {
            return Err(Error::invalid_input("starting cash cannot be negative"));
        }
        Ok(())
    }
}

pub(crate) fn validate_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(ValidationError::MissingField("username".to_string()).into());
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(Error::invalid_input(format!(
            "username must be at most {} characters",
            MAX_USERNAME_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn serialized_user_never_exposes_hash() {
        let user = User {
            id: 7,
            username: "alice".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            cash: dec!(10000),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn new_user_rejects_long_username_and_negative_cash() {
        let mut new_user = NewUser {
            username: "a".repeat(51),
            password_hash: "hash".to_string(),
            cash: dec!(10000),
        };
        assert!(new_user.validate().is_err());

        new_user.username = "alice".to_string();
        assert!(new_user.validate().is_ok());

        new_user.cash = dec!(-1);
        assert!(new_user.validate().is_err());
    }
}
