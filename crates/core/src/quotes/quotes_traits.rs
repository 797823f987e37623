use async_trait::async_trait;

use crate::errors::Result;
use papertrade_market_data::Quote;

/// Trait defining the contract for quote lookups used by the trading engine.
#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    /// Looks up the current price of `symbol`.
    ///
    /// The symbol is validated and normalized first. A symbol the provider
    /// does not know yields `Error::MarketData(SymbolNotFound)`.
    async fn get_quote(&self, symbol: &str) -> Result<Quote>;
}
