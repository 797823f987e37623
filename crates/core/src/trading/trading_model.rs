//! Trading domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Error, Result, ValidationError};
use crate::quotes::parse_symbol;

/// Direction of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Sign applied to the share count stored in the ledger.
    pub fn signed(self, shares: i64) -> i64 {
        match self {
            TradeSide::Buy => shares,
            TradeSide::Sell => -shares,
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// An immutable ledger entry.
///
/// `shares` is signed: positive for a buy, negative for a sell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i32,
    pub user_id: i32,
    pub symbol: String,
    pub shares: i64,
    pub price: Decimal,
    pub transacted_at: DateTime<Utc>,
}

impl Transaction {
    pub fn side(&self) -> TradeSide {
        if self.shares < 0 {
            TradeSide::Sell
        } else {
            TradeSide::Buy
        }
    }
}

/// Raw order as submitted by a client. Fields are validated by
/// [`TradeOrder::parse`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    pub symbol: Option<String>,
    pub shares: Option<String>,
}

/// A validated order: canonical symbol and a strictly positive share count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeOrder {
    pub side: TradeSide,
    pub symbol: String,
    pub shares: i64,
}

impl TradeOrder {
    pub fn parse(side: TradeSide, request: &TradeRequest) -> Result<Self> {
        let symbol = parse_symbol(request.symbol.as_deref())?;
        let shares = parse_share_count(request.shares.as_deref())?;
        Ok(Self {
            side,
            symbol,
            shares,
        })
    }
}

/// Parses a share count: ASCII digits only, strictly positive.
///
/// Signs, decimals, exponents and surrounding whitespace are all rejected.
pub fn parse_share_count(raw: Option<&str>) -> Result<i64> {
    let raw = raw.unwrap_or_default();
    if raw.is_empty() {
        return Err(ValidationError::MissingField("shares".to_string()).into());
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_input("invalid number of shares"));
    }
    match raw.parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err(Error::invalid_input("invalid number of shares")),
        Err(_) => Err(Error::invalid_input("number of shares is too large")),
    }
}

/// Cash and position read inside the write transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub cash: Decimal,
    pub held_shares: i64,
}

/// A user's cash balance and full ledger, read from one consistent snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSnapshot {
    pub cash: Decimal,
    /// Newest first
    pub transactions: Vec<Transaction>,
}

/// Outcome of a validated order, ready to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// Cash balance after the trade
    pub cash_after: Decimal,
    /// Signed share count to append to the ledger
    pub signed_shares: i64,
    /// Absolute order value (shares x price)
    pub total: Decimal,
}

/// What the store returns after an atomic trade.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedTrade {
    pub transaction: Transaction,
    pub cash_balance: Decimal,
    pub total: Decimal,
}

/// Response to a successful buy or sell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeReceipt {
    pub side: TradeSide,
    pub transaction: Transaction,
    pub total: Decimal,
    pub cash_balance: Decimal,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_count_accepts_only_plain_positive_integers() {
        assert_eq!(parse_share_count(Some("10")).unwrap(), 10);
        assert_eq!(parse_share_count(Some("007")).unwrap(), 7);

        for bad in ["0", "-5", "+5", "1.5", "1e3", " 5", "five", "00"] {
            assert!(
                parse_share_count(Some(bad)).is_err(),
                "{bad:?} should be rejected"
            );
        }
        assert!(matches!(
            parse_share_count(None),
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
        assert!(parse_share_count(Some("99999999999999999999")).is_err());
    }

    #[test]
    fn order_parse_normalizes_symbol() {
        let order = TradeOrder::parse(
            TradeSide::Buy,
            &TradeRequest {
                symbol: Some("nvda".to_string()),
                shares: Some("3".to_string()),
            },
        )
        .unwrap();
        assert_eq!(order.symbol, "NVDA");
        assert_eq!(order.shares, 3);
    }

    #[test]
    fn side_follows_share_sign() {
        assert_eq!(TradeSide::Sell.signed(4), -4);
        assert_eq!(TradeSide::Buy.signed(4), 4);
        assert_eq!(TradeSide::Sell.to_string(), "SELL");
    }
}
