//! Quotes module - symbol validation and the quote lookup service.

mod quotes_service;
mod quotes_traits;

pub use papertrade_market_data::Quote;
pub use quotes_service::{parse_symbol, QuoteService};
pub use quotes_traits::QuoteServiceTrait;
