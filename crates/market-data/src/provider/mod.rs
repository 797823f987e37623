//! Market data provider abstractions and implementations.
//!
//! The core system only depends on the [`MarketDataProvider`] trait; concrete
//! HTTP providers live in submodules.

mod traits;

pub mod fmp;

pub use traits::MarketDataProvider;
