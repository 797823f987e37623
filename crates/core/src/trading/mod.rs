//! Trading module - the buy/sell engine over the append-only ledger.

mod settlement;
mod trading_model;
mod trading_service;
mod trading_traits;

#[cfg(test)]
mod trading_service_tests;

pub use settlement::settle;
pub use trading_model::{
    parse_share_count, AccountSnapshot, ExecutedTrade, LedgerSnapshot, Settlement, TradeOrder, TradeReceipt,
    TradeRequest, TradeSide, Transaction,
};
pub use trading_service::TradingService;
pub use trading_traits::{LedgerRepositoryTrait, TradingServiceTrait};
