use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::portfolio_model::{Holding, Portfolio};
use super::portfolio_traits::PortfolioServiceTrait;
use super::positions::{aggregate_positions, Position};
use crate::errors::{Error, Result};
use crate::quotes::QuoteServiceTrait;
use crate::trading::LedgerRepositoryTrait;

fn out_of_range() -> Error {
    Error::Unexpected("portfolio value is out of range".to_string())
}

/// Portfolio valuation over the ledger and live quotes.
pub struct PortfolioService {
    ledger: Arc<dyn LedgerRepositoryTrait>,
    quote_service: Arc<dyn QuoteServiceTrait>,
}

impl PortfolioService {
    pub fn new(
        ledger: Arc<dyn LedgerRepositoryTrait>,
        quote_service: Arc<dyn QuoteServiceTrait>,
    ) -> Self {
        Self {
            ledger,
            quote_service,
        }
    }

    /// A failed quote leaves the holding unpriced. A value that does not fit
    /// in a `Decimal` is an error.
    async fn value_position(&self, position: Position) -> Result<Holding> {
        match self.quote_service.get_quote(&position.symbol).await {
            Ok(quote) => {
                let value = Decimal::from(position.shares)
                    .checked_mul(quote.price)
                    .ok_or_else(out_of_range)?;
                Ok(Holding {
                    symbol: position.symbol,
                    shares: position.shares,
                    current_price: Some(quote.price),
                    position_value: Some(value),
                })
            }
            Err(e) => {
                warn!("Could not price {}: {}", position.symbol, e);
                Ok(Holding {
                    symbol: position.symbol,
                    shares: position.shares,
                    current_price: None,
                    position_value: None,
                })
            }
        }
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn get_portfolio(&self, user_id: i32) -> Result<Portfolio> {
        let account = self.ledger.get_account_snapshot(user_id)?;
        let positions = aggregate_positions(&account.transactions);
        debug!("Valuing {} positions for user {}", positions.len(), user_id);

        let holdings = join_all(positions.into_iter().map(|p| self.value_position(p)))
            .await
            .into_iter()
            .collect::<Result<Vec<Holding>>>()?;

        let holdings_value = holdings
            .iter()
            .filter_map(|h| h.position_value)
            .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
            .ok_or_else(out_of_range)?;
        let total_value = account
            .cash
            .checked_add(holdings_value)
            .ok_or_else(out_of_range)?;
        let unpriced_symbols = holdings
            .iter()
            .filter(|h| h.position_value.is_none())
            .map(|h| h.symbol.clone())
            .collect();

        Ok(Portfolio {
            cash: account.cash,
            total_value,
            holdings_value,
            holdings,
            unpriced_symbols,
            as_of: Utc::now(),
        })
    }

    fn get_held_symbols(&self, user_id: i32) -> Result<Vec<String>> {
        let transactions = self.ledger.list_transactions(user_id)?;
        Ok(aggregate_positions(&transactions)
            .into_iter()
            .map(|p| p.symbol)
            .collect())
    }
}
