//! Papertrade Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the trading simulator: user
//! registration and authentication, the buy/sell trading engine and portfolio
//! valuation. It is database-agnostic and defines repository traits that are
//! implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod portfolio;
pub mod quotes;
pub mod trading;
pub mod users;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
