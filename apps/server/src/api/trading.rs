use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Extension, Json, Router,
};
use papertrade_core::trading::TradeReceipt;

use crate::{
    auth::AuthUser,
    error::ApiResult,
    main_lib::AppState,
    models::{HistoryEntry, TradeForm},
};

async fn buy(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<TradeForm>, JsonRejection>,
) -> ApiResult<Json<TradeReceipt>> {
    let Json(form) = payload?;
    let receipt = state.trading_service.buy(user.user_id, form.into()).await?;
    Ok(Json(receipt))
}

async fn sell(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<TradeForm>, JsonRejection>,
) -> ApiResult<Json<TradeReceipt>> {
    let Json(form) = payload?;
    let receipt = state.trading_service.sell(user.user_id, form.into()).await?;
    Ok(Json(receipt))
}

async fn held_symbols(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.portfolio_service.get_held_symbols(user.user_id)?))
}

async fn history(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<HistoryEntry>>> {
    let transactions = state.trading_service.get_history(user.user_id)?;
    Ok(Json(transactions.into_iter().map(HistoryEntry::from).collect()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/buy", post(buy))
        .route("/sell", post(sell))
        .route("/sell/symbols", get(held_symbols))
        .route("/history", get(history))
}
