use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use super::quotes_traits::QuoteServiceTrait;
use crate::constants::MAX_SYMBOL_LEN;
use crate::errors::{Error, Result, ValidationError};
use papertrade_market_data::{normalize_symbol, MarketDataProvider, Quote};

/// Validates a raw ticker and returns its canonical (upper-cased) form.
///
/// Accepts ASCII letters and digits plus `.` and `-` (class shares such as
/// `BRK.B`), at most [`MAX_SYMBOL_LEN`] characters.
pub fn parse_symbol(raw: Option<&str>) -> Result<String> {
    let symbol = raw.map(normalize_symbol).unwrap_or_default();
    if symbol.is_empty() {
        return Err(ValidationError::MissingField("symbol".to_string()).into());
    }
    if symbol.chars().count() > MAX_SYMBOL_LEN {
        return Err(Error::invalid_input(format!(
            "symbol must be at most {} characters",
            MAX_SYMBOL_LEN
        )));
    }
    if !symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(Error::invalid_input("symbol contains invalid characters"));
    }
    Ok(symbol)
}

/// Quote lookups backed by a single market data provider.
pub struct QuoteService {
    provider: Arc<dyn MarketDataProvider>,
}

impl QuoteService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        let symbol = parse_symbol(Some(symbol))?;
        debug!("Looking up {} via {}", symbol, self.provider.id());

        match self.provider.get_latest_quote(&symbol).await {
            Ok(quote) => Ok(quote),
            Err(e) => {
                if !e.is_not_found() {
                    warn!("Quote lookup for {} failed: {}", symbol, e);
                }
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use papertrade_market_data::MarketDataError;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    struct RecordingProvider {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MarketDataProvider for RecordingProvider {
        fn id(&self) -> &'static str {
            "RECORDING"
        }

        async fn get_latest_quote(
            &self,
            symbol: &str,
        ) -> std::result::Result<Quote, MarketDataError> {
            self.seen.lock().unwrap().push(symbol.to_string());
            match symbol {
                "NVDA" => Ok(Quote::new(symbol, dec!(100), self.id())),
                "DOWN" => Err(MarketDataError::Timeout {
                    provider: self.id().to_string(),
                }),
                _ => Err(MarketDataError::SymbolNotFound(symbol.to_string())),
            }
        }
    }

    fn service() -> (QuoteService, Arc<RecordingProvider>) {
        let provider = Arc::new(RecordingProvider {
            seen: Mutex::new(Vec::new()),
        });
        (QuoteService::new(provider.clone()), provider)
    }

    #[test]
    fn parse_symbol_normalizes_and_validates() {
        assert_eq!(parse_symbol(Some(" nvda ")).unwrap(), "NVDA");
        assert_eq!(parse_symbol(Some("brk.b")).unwrap(), "BRK.B");
        assert!(matches!(
            parse_symbol(None),
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
        assert!(parse_symbol(Some("   ")).is_err());
        assert!(parse_symbol(Some("TOOLONGSYMBOL")).is_err());
        assert!(parse_symbol(Some("AA PL")).is_err());
        assert!(parse_symbol(Some("'; DROP")).is_err());
    }

    #[tokio::test]
    async fn lookup_uses_normalized_symbol() {
        let (service, provider) = service();
        let quote = service.get_quote("nvda").await.unwrap();
        assert_eq!(quote.price, dec!(100));
        assert_eq!(provider.seen.lock().unwrap().as_slice(), ["NVDA"]);
    }

    #[tokio::test]
    async fn unknown_symbol_and_outage_stay_distinguishable() {
        let (service, _) = service();

        let err = service.get_quote("ZZZZ").await.unwrap_err();
        assert!(matches!(err, Error::MarketData(ref e) if e.is_not_found()));

        let err = service.get_quote("DOWN").await.unwrap_err();
        assert!(matches!(err, Error::MarketData(ref e) if !e.is_not_found()));
    }

    #[tokio::test]
    async fn invalid_symbol_never_reaches_provider() {
        let (service, provider) = service();
        assert!(service.get_quote("").await.is_err());
        assert!(provider.seen.lock().unwrap().is_empty());
    }
}
