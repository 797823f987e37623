//! Portfolio module - position aggregation and valuation.

mod portfolio_model;
mod portfolio_service;
mod portfolio_traits;
mod positions;


pub use portfolio_model::{Holding, Portfolio};
pub use portfolio_service::PortfolioService;
pub use portfolio_traits::PortfolioServiceTrait;
pub use positions::{aggregate_positions, held_shares, Position};
