//! Market data models.

mod quote;

pub use quote::{normalize_symbol, Quote};
