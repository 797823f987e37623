//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::Quote;

/// Trait for quote providers.
///
/// Implement this trait to add support for a new market data source.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use papertrade_market_data::{MarketDataError, MarketDataProvider, Quote};
///
/// struct FixedPrice;
///
/// #[async_trait]
/// impl MarketDataProvider for FixedPrice {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
///         Ok(Quote::new(symbol, rust_decimal::Decimal::ONE_HUNDRED, self.id()))
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "FMP".
    ///
    /// Used for logging and stamped on every quote as its source.
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for a ticker.
    ///
    /// `symbol` is already normalized (trimmed, upper-cased). Returns
    /// [`MarketDataError::SymbolNotFound`] when the provider answered but has
    /// no such ticker; any other error means the lookup itself failed.
    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;
}
