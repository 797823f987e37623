//! SQLite storage implementation for Papertrade.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `papertrade-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The single-writer actor that serialises every write
//! - Repository implementations for users and the transaction ledger
//!
//! This crate is the only place in the application where Diesel dependencies exist.

pub mod db;
pub mod errors;
pub mod ledger;
pub mod schema;
pub mod users;
mod utils;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use ledger::LedgerRepository;
pub use users::UserRepository;

// Re-export from papertrade-core for convenience
pub use papertrade_core::errors::{DatabaseError, Error, Result};
