//! Position aggregation over the ledger.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::trading::Transaction;

/// Net shares of one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub shares: i64,
}

/// Groups transactions by symbol and sums their signed share counts.
///
/// Only held positions (strictly positive sums) are returned, ordered by
/// symbol.
pub fn aggregate_positions(transactions: &[Transaction]) -> Vec<Position> {
    let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
    for transaction in transactions {
        *totals.entry(transaction.symbol.as_str()).or_insert(0) += transaction.shares;
    }

    totals
        .into_iter()
        .filter(|(_, shares)| *shares > 0)
        .map(|(symbol, shares)| Position {
            symbol: symbol.to_string(),
            shares,
        })
        .collect()
}

/// Net shares of `symbol`, which may be zero.
pub fn held_shares(transactions: &[Transaction], symbol: &str) -> i64 {
    transactions
        .iter()
        .filter(|t| t.symbol == symbol)
        .map(|t| t.shares)
        .sum()
}
