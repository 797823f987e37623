//! SQLite storage implementation for the transaction ledger.

mod model;
mod repository;

pub use model::{NewTransactionDB, TransactionDB};
pub use repository::LedgerRepository;
