//! Ledger repository and trading service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::trading_model::{
    AccountSnapshot, ExecutedTrade, TradeOrder, TradeReceipt, TradeRequest, Transaction,
};
use crate::errors::Result;

/// Trait defining the contract for the append-only transaction ledger.
#[async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    /// Lists a user's transactions, newest first.
    fn list_transactions(&self, user_id: i32) -> Result<Vec<Transaction>>;

    /// Reads the user's cash and transactions in a single read transaction,
    /// so a concurrent trade is either wholly visible or not at all.
    fn get_account_snapshot(&self, user_id: i32) -> Result<AccountSnapshot>;

    /// Sum of the user's signed share counts for `symbol`.
    fn held_shares(&self, user_id: i32, symbol: &str) -> Result<i64>;

    /// Applies `order` at `price` atomically.
    ///
    /// Implementations read the user's cash and position, validate with
    /// [`settle`](super::settle), update the cash balance and append the
    /// transaction inside one transaction, serialised against every other
    /// write. Either both writes happen or neither does.
    async fn execute_trade(
        &self,
        user_id: i32,
        order: TradeOrder,
        price: Decimal,
    ) -> Result<ExecutedTrade>;
}

/// Trait defining the contract for trading operations.
#[async_trait]
pub trait TradingServiceTrait: Send + Sync {
    /// Buys shares at the current market price.
    async fn buy(&self, user_id: i32, request: TradeRequest) -> Result<TradeReceipt>;

    /// Sells held shares at the current market price.
    async fn sell(&self, user_id: i32, request: TradeRequest) -> Result<TradeReceipt>;

    /// The user's transaction history, newest first.
    fn get_history(&self, user_id: i32) -> Result<Vec<Transaction>>;
}
