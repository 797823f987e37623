//! Papertrade Market Data Crate
//!
//! Provider-agnostic quote lookup for the Papertrade simulator.
//!
//! The domain only ever asks one question of this crate: "what is the
//! current price of this ticker?". Providers answer with a [`Quote`] or a
//! [`MarketDataError`] that tells apart "the provider has no such symbol"
//! from "the provider could not be reached".
//!
//! # Core Types
//!
//! - [`MarketDataProvider`] - Trait implemented by every quote source
//! - [`Quote`] - Latest price for a symbol
//! - [`FmpProvider`] - Financial Modeling Prep implementation

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{normalize_symbol, Quote};
pub use provider::fmp::FmpProvider;
pub use provider::MarketDataProvider;
