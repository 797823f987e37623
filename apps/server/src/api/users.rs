use std::sync::Arc;

use axum::{extract::State, routing::get, Extension, Json, Router};

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState, models::UserResponse};

async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.get_user(user.user_id)?;
    Ok(Json(user.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/me", get(get_me))
}
