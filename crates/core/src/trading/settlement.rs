//! Order validation kernel.
//!
//! `settle` is pure: storage implementations call it with the cash balance and
//! position they read inside their write transaction, so the check and the
//! write observe the same state.

use rust_decimal::Decimal;

use super::trading_model::{LedgerSnapshot, Settlement, TradeOrder, TradeSide};
use crate::errors::{Error, Result, TradingError};

/// Validates `order` at `price` against `snapshot` and computes its effect.
pub fn settle(snapshot: LedgerSnapshot, order: &TradeOrder, price: Decimal) -> Result<Settlement> {
    if price <= Decimal::ZERO {
        return Err(Error::invalid_input("price must be positive"));
    }
    if order.shares <= 0 {
        return Err(Error::invalid_input("invalid number of shares"));
    }

    let total = Decimal::from(order.shares)
        .checked_mul(price)
        .ok_or_else(|| Error::invalid_input("order value is out of range"))?;

    let cash_after = match order.side {
        TradeSide::Buy => {
            if total > snapshot.cash {
                return Err(TradingError::InsufficientFunds {
                    required: total,
                    available: snapshot.cash,
                }
                .into());
            }
            snapshot.cash - total
        }
        TradeSide::Sell => {
            if order.shares > snapshot.held_shares {
                return Err(TradingError::InsufficientShares {
                    symbol: order.symbol.clone(),
                    requested: order.shares,
                    held: snapshot.held_shares.max(0),
                }
                .into());
            }
            snapshot
                .cash
                .checked_add(total)
                .ok_or_else(|| Error::invalid_input("order value is out of range"))?
        }
    };

    Ok(Settlement {
        cash_after,
        signed_shares: order.side.signed(order.shares),
        total,
    })
}
