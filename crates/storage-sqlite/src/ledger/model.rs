//! Database models for ledger transactions.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::parse_decimal;
use papertrade_core::trading::Transaction;

/// Database model for a ledger row. Buys carry positive `shares`, sells
/// negative.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: i32,
    pub user_id: i32,
    pub symbol: String,
    pub shares: i64,
    pub price: String,
    pub transacted_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransactionDB {
    pub user_id: i32,
    pub symbol: String,
    pub shares: i64,
    pub price: String,
    pub transacted_at: NaiveDateTime,
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = StorageError;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            price: parse_decimal("transactions.price", &db.price)?,
            id: db.id,
            user_id: db.user_id,
            symbol: db.symbol,
            shares: db.shares,
            transacted_at: db.transacted_at.and_utc(),
        })
    }
}
