use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::trading_model::{
    ExecutedTrade, TradeOrder, TradeReceipt, TradeRequest, TradeSide, Transaction,
};
use super::trading_traits::{LedgerRepositoryTrait, TradingServiceTrait};
use crate::errors::{Result, TradingError};
use crate::quotes::QuoteServiceTrait;
use crate::utils::format_usd;

/// Buy/sell engine: validates orders, prices them and hands them to the
/// ledger for atomic application.
pub struct TradingService {
    ledger: Arc<dyn LedgerRepositoryTrait>,
    quote_service: Arc<dyn QuoteServiceTrait>,
}

impl TradingService {
    pub fn new(
        ledger: Arc<dyn LedgerRepositoryTrait>,
        quote_service: Arc<dyn QuoteServiceTrait>,
    ) -> Self {
        Self {
            ledger,
            quote_service,
        }
    }

    async fn execute(&self, user_id: i32, order: TradeOrder) -> Result<TradeReceipt> {
        let quote = self.quote_service.get_quote(&order.symbol).await?;
        debug!(
            "{} {} {} @ {} for user {}",
            order.side, order.shares, order.symbol, quote.price, user_id
        );

        let side = order.side;
        let ExecutedTrade {
            transaction,
            cash_balance,
            total,
        } = self
            .ledger
            .execute_trade(user_id, order, quote.price)
            .await?;

        info!(
            "User {} {} {} {} @ {} (transaction {})",
            user_id,
            side,
            transaction.shares.abs(),
            transaction.symbol,
            transaction.price,
            transaction.id
        );

        let verb = match side {
            TradeSide::Buy => "Bought",
            TradeSide::Sell => "Sold",
        };
        let message = format!(
            "{} {} shares of {} for {}",
            verb,
            transaction.shares.abs(),
            transaction.symbol,
            format_usd(total)
        );

        Ok(TradeReceipt {
            side,
            transaction,
            total,
            cash_balance,
            message,
        })
    }
}

#[async_trait]
impl TradingServiceTrait for TradingService {
    async fn buy(&self, user_id: i32, request: TradeRequest) -> Result<TradeReceipt> {
        let order = TradeOrder::parse(TradeSide::Buy, &request)?;
        self.execute(user_id, order).await
    }

    async fn sell(&self, user_id: i32, request: TradeRequest) -> Result<TradeReceipt> {
        let order = TradeOrder::parse(TradeSide::Sell, &request)?;

        // Checked before the quote lookup; the ledger re-checks inside its
        // write transaction.
        let held = self.ledger.held_shares(user_id, &order.symbol)?;
        if order.shares > held {
            return Err(TradingError::InsufficientShares {
                symbol: order.symbol,
                requested: order.shares,
                held: held.max(0),
            }
            .into());
        }

        self.execute(user_id, order).await
    }

    fn get_history(&self, user_id: i32) -> Result<Vec<Transaction>> {
        self.ledger.list_transactions(user_id)
    }
}
