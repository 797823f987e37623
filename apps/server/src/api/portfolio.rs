use std::sync::Arc;

use axum::{extract::State, routing::get, Extension, Json, Router};
use papertrade_core::portfolio::Portfolio;

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

async fn get_portfolio(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Portfolio>> {
    let portfolio = state.portfolio_service.get_portfolio(user.user_id).await?;
    Ok(Json(portfolio))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/portfolio", get(get_portfolio))
}
