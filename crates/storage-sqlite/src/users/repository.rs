use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::info;
use std::sync::Arc;

use papertrade_core::users::{NewUser, User, UserRepositoryTrait};
use papertrade_core::{Error, Result};

use super::model::{NewUserDB, UserDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        let new_user_db: NewUserDB = new_user.into();
        let user = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let created = diesel::insert_into(users::table)
                    .values(&new_user_db)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(User::try_from(created)?)
            })
            .await?;
        info!("Registered user {} ({})", user.id, user.username);
        Ok(user)
    }

    fn get_by_id(&self, user_id: i32) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let user_db = users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first(&mut conn)
            .into_core()?;
        User::try_from(user_db).map_err(Error::from)
    }

    fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .filter(users::username.eq(username))
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(User::try_from)
            .transpose()
            .map_err(Error::from)
    }
}
