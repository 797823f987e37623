use async_trait::async_trait;

use super::portfolio_model::Portfolio;
use crate::errors::Result;

#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    /// Values every held position at the current price.
    async fn get_portfolio(&self, user_id: i32) -> Result<Portfolio>;

    /// Symbols the user currently holds, alphabetical.
    fn get_held_symbols(&self, user_id: i32) -> Result<Vec<String>>;
}
