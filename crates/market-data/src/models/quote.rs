use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest market quote for a ticker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Upper-cased ticker symbol
    pub symbol: String,

    /// Company or instrument name, when the provider reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Current price per share
    pub price: Decimal,

    /// When the quote was obtained
    pub timestamp: DateTime<Utc>,

    /// Provider that produced the quote (FMP, STATIC, ...)
    pub source: String,
}

impl Quote {
    /// Create a quote stamped with the current time.
    pub fn new(symbol: &str, price: Decimal, source: &str) -> Self {
        Self {
            symbol: normalize_symbol(symbol),
            name: None,
            price,
            timestamp: Utc::now(),
            source: source.to_string(),
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name.filter(|n| !n.trim().is_empty());
        self
    }
}

/// Canonical form of a ticker: surrounding whitespace removed, upper-cased.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
