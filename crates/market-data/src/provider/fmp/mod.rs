//! Financial Modeling Prep quote provider.
//!
//! Uses the `/stable/profile` endpoint, which returns a JSON array with one
//! company profile per matching symbol. An empty array means the symbol is
//! unknown. API documentation: https://site.financialmodelingprep.com/developer/docs

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::MarketDataProvider;

const BASE_URL: &str = "https://financialmodelingprep.com/stable";
const PROVIDER_ID: &str = "FMP";

/// Single entry of the /profile response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileItem {
    /// Current price
    price: Option<serde_json::Number>,
    /// Company name
    company_name: Option<String>,
}

/// Financial Modeling Prep provider.
pub struct FmpProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl FmpProvider {
    /// Create a new provider with the given API key and request timeout.
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self, MarketDataError> {
        let client = Client::builder().timeout(timeout).build()?;

        if api_key.is_none() {
            warn!("FMP provider created without an API key; lookups will be rejected");
        }

        Ok(Self {
            client,
            api_key,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the provider at a different host (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn fetch_profile(&self, symbol: &str) -> Result<String, MarketDataError> {
        let url = format!("{}/profile", self.base_url);
        let api_key = self.api_key.as_deref().unwrap_or_default();

        debug!("FMP profile request for {}", symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol), ("apikey", api_key)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: format!("Request failed: {}", e),
                    }
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "Invalid or missing API key".to_string(),
            });
        }

        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        Ok(response.text().await?)
    }
}

/// Turn a /profile response body into a quote.
fn parse_profile_response(symbol: &str, body: &str) -> Result<Quote, MarketDataError> {
    let items: Vec<ProfileItem> =
        serde_json::from_str(body).map_err(|e| MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse response: {}", e),
        })?;

    let Some(item) = items.into_iter().next() else {
        return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
    };

    let price = item
        .price
        .and_then(|n| Decimal::from_str(&n.to_string()).ok())
        .filter(|p| p.is_sign_positive() && !p.is_zero())
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

    Ok(Quote::new(symbol, price, PROVIDER_ID).with_name(item.company_name))
}

#[async_trait]
impl MarketDataProvider for FmpProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let body = self.fetch_profile(symbol).await?;
        parse_profile_response(symbol, &body)
    }
}
