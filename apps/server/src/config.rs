use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use papertrade_core::constants::DEFAULT_STARTING_CASH;
use rust_decimal::Decimal;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// JWT signing secret; a random one is generated when unset.
    pub secret_key: Option<String>,
    pub token_ttl: Duration,
    pub starting_cash: Decimal,
    pub fmp_api_key: Option<String>,
    pub quote_timeout: Duration,
}

fn var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(name) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("Invalid {name}: {raw:?}")),
        None => Ok(default),
    }
}

fn minutes(name: &str, value: u64) -> anyhow::Result<Duration> {
    value
        .checked_mul(60)
        .map(Duration::from_secs)
        .with_context(|| format!("Invalid {name}: {value} minutes is out of range"))
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr =
            parse_var("PT_LISTEN_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?;
        let db_path = var("PT_DB_PATH").unwrap_or_else(|| "./db/papertrade.db".into());
        let cors_allow = var("PT_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = parse_var("PT_REQUEST_TIMEOUT_MS", 30_000)?;
        let token_ttl = minutes(
            "PT_TOKEN_TTL_MINUTES",
            parse_var("PT_TOKEN_TTL_MINUTES", 60)?,
        )?;
        let starting_cash: Decimal = parse_var("PT_STARTING_CASH", DEFAULT_STARTING_CASH)?;
        if starting_cash.is_sign_negative() {
            anyhow::bail!("PT_STARTING_CASH cannot be negative");
        }
        let quote_timeout_ms: u64 = parse_var("PT_QUOTE_TIMEOUT_MS", 10_000)?;

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            secret_key: var("PT_SECRET_KEY"),
            token_ttl,
            starting_cash,
            fmp_api_key: var("FMP_API_KEY"),
            quote_timeout: Duration::from_millis(quote_timeout_ms),
        })
    }
}
