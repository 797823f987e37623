use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use papertrade_core::quotes::parse_symbol;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{QuoteQuery, QuoteResponse},
};

async fn get_quote(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QuoteQuery>,
) -> ApiResult<Json<QuoteResponse>> {
    let symbol = parse_symbol(query.symbol.as_deref())?;
    let quote = state.quote_service.get_quote(&symbol).await?;
    Ok(Json(quote.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/quote", get(get_quote))
}
