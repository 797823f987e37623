use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;

use papertrade_core::trading::{
    settle, AccountSnapshot, ExecutedTrade, LedgerRepositoryTrait, LedgerSnapshot, TradeOrder,
    Transaction,
};
use papertrade_core::{Error, Result};

use super::model::{NewTransactionDB, TransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::{transactions, users};
use crate::utils::parse_decimal;

pub struct LedgerRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LedgerRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        LedgerRepository { pool, writer }
    }
}

fn sum_held_shares(conn: &mut SqliteConnection, user_id: i32, symbol: &str) -> Result<i64> {
    let rows: Vec<i64> = transactions::table
        .filter(transactions::user_id.eq(user_id))
        .filter(transactions::symbol.eq(symbol))
        .select(transactions::shares)
        .load(conn)
        .into_core()?;
    Ok(rows.into_iter().sum())
}

fn load_transactions(
    conn: &mut SqliteConnection,
    user_id: i32,
) -> std::result::Result<Vec<TransactionDB>, diesel::result::Error> {
    transactions::table
        .filter(transactions::user_id.eq(user_id))
        .order((transactions::transacted_at.desc(), transactions::id.desc()))
        .select(TransactionDB::as_select())
        .load(conn)
}

fn into_transactions(rows: Vec<TransactionDB>) -> Result<Vec<Transaction>> {
    rows.into_iter()
        .map(|row| Transaction::try_from(row).map_err(Error::from))
        .collect()
}

#[async_trait]
impl LedgerRepositoryTrait for LedgerRepository {
    fn list_transactions(&self, user_id: i32) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        into_transactions(load_transactions(&mut conn, user_id).into_core()?)
    }

    fn get_account_snapshot(&self, user_id: i32) -> Result<AccountSnapshot> {
        let mut pooled = get_connection(&self.pool)?;
        let conn: &mut SqliteConnection = &mut pooled;
        // Both reads share one WAL snapshot, taken at the first SELECT.
        let (stored_cash, rows) = conn.transaction::<_, StorageError, _>(|conn| {
            let stored_cash: String = users::table
                .find(user_id)
                .select(users::cash)
                .first(conn)?;
            let rows = load_transactions(conn, user_id)?;
            Ok((stored_cash, rows))
        })?;

        Ok(AccountSnapshot {
            cash: parse_decimal("users.cash", &stored_cash)?,
            transactions: into_transactions(rows)?,
        })
    }

    fn held_shares(&self, user_id: i32, symbol: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        sum_held_shares(&mut conn, user_id, symbol)
    }

    async fn execute_trade(
        &self,
        user_id: i32,
        order: TradeOrder,
        price: Decimal,
    ) -> Result<ExecutedTrade> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ExecutedTrade> {
                let stored_cash: String = users::table
                    .find(user_id)
                    .select(users::cash)
                    .first(conn)
                    .into_core()?;
                let snapshot = LedgerSnapshot {
                    cash: parse_decimal("users.cash", &stored_cash)?,
                    held_shares: sum_held_shares(conn, user_id, &order.symbol)?,
                };

                let settlement = settle(snapshot, &order, price)?;

                diesel::update(users::table.find(user_id))
                    .set(users::cash.eq(settlement.cash_after.to_string()))
                    .execute(conn)
                    .into_core()?;

                let row = NewTransactionDB {
                    user_id,
                    symbol: order.symbol,
                    shares: settlement.signed_shares,
                    price: price.to_string(),
                    transacted_at: Utc::now().naive_utc(),
                };
                let inserted = diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .into_core()?;

                Ok(ExecutedTrade {
                    transaction: Transaction::try_from(inserted)?,
                    cash_balance: settlement.cash_after,
                    total: settlement.total,
                })
            })
            .await
    }
}
