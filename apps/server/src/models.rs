//! Request and response bodies of the HTTP API.

use chrono::{DateTime, Utc};
use papertrade_core::quotes::Quote;
use papertrade_core::trading::{TradeRequest, TradeSide, Transaction};
use papertrade_core::users::{RegisterUser, User};
use papertrade_core::utils::format_usd;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub confirmation: Option<String>,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        RegisterUser {
            username: req.username,
            password: req.password,
            confirmation: req.confirmation,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub cash: Decimal,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            cash: user.cash,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct QuoteQuery {
    pub symbol: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub symbol: String,
    pub name: Option<String>,
    pub price: Decimal,
    /// Price formatted as USD, e.g. `$1,234.56`
    pub display_price: String,
    pub timestamp: DateTime<Utc>,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            display_price: format_usd(quote.price),
            symbol: quote.symbol,
            name: quote.name,
            price: quote.price,
            timestamp: quote.timestamp,
        }
    }
}

/// A buy or sell form. `shares` may be sent as a JSON string or number.
#[derive(Debug, Default, Deserialize)]
pub struct TradeForm {
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "share_count_as_text")]
    pub shares: Option<String>,
}

impl From<TradeForm> for TradeRequest {
    fn from(form: TradeForm) -> Self {
        TradeRequest {
            symbol: form.symbol,
            shares: form.shares,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ShareCount {
    Text(String),
    Number(serde_json::Number),
}

fn share_count_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<ShareCount>::deserialize(deserializer)?.map(|count| match count {
            ShareCount::Text(text) => text,
            ShareCount::Number(number) => number.to_string(),
        }),
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i32,
    pub side: TradeSide,
    pub symbol: String,
    /// Signed: positive for buys, negative for sells
    pub shares: i64,
    pub price: Decimal,
    pub transacted_at: DateTime<Utc>,
}

impl From<Transaction> for HistoryEntry {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            side: tx.side(),
            symbol: tx.symbol,
            shares: tx.shares,
            price: tx.price,
            transacted_at: tx.transacted_at,
        }
    }
}
