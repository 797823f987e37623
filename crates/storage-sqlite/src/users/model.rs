//! Database models for users.

use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::parse_decimal;
use papertrade_core::users::{NewUser, User};

/// Database model for users
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: i32,
    pub username: String,
    pub hash: String,
    pub cash: String,
}

/// Database model for registering a user
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserDB {
    pub username: String,
    pub hash: String,
    pub cash: String,
}

impl TryFrom<UserDB> for User {
    type Error = StorageError;

    fn try_from(db: UserDB) -> Result<Self, Self::Error> {
        Ok(Self {
            cash: parse_decimal("users.cash", &db.cash)?,
            id: db.id,
            username: db.username,
            password_hash: db.hash,
        })
    }
}

impl From<NewUser> for NewUserDB {
    fn from(domain: NewUser) -> Self {
        Self {
            username: domain.username,
            hash: domain.password_hash,
            cash: domain.cash.to_string(),
        }
    }
}
