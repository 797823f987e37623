//! Helpers for working with values stored as SQLite TEXT.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;

/// Parses a decimal column. Money is stored as TEXT to keep it exact.
pub(crate) fn parse_decimal(column: &str, raw: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(raw)
        .map_err(|e| StorageError::SerializationError(format!("{} '{}': {}", column, raw, e)))
}
