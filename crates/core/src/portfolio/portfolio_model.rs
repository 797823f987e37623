use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// A held position valued at the current market price.
///
/// `current_price` and `position_value` are `None` when the quote lookup
/// for the symbol failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub shares: i64,
    pub current_price: Option<Decimal>,
    pub position_value: Option<Decimal>,
}

/// Valuation of a user's account.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub cash: Decimal,
    pub holdings: Vec<Holding>,
    /// Sum of the known position values
    pub holdings_value: Decimal,
    /// cash + holdings_value
    pub total_value: Decimal,
    /// Held symbols whose price could not be fetched
    pub unpriced_symbols: Vec<String>,
    pub as_of: DateTime<Utc>,
}
