use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use papertrade_core::errors::{Error as CoreError, UserError};
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Validation(_) | CoreError::Trading(_) => StatusCode::BAD_REQUEST,
        CoreError::MarketData(e) if e.is_not_found() => StatusCode::BAD_REQUEST,
        CoreError::MarketData(_) => StatusCode::BAD_GATEWAY,
        CoreError::User(UserError::DuplicateUsername(_)) => StatusCode::CONFLICT,
        CoreError::User(UserError::AuthenticationFailure) => StatusCode::FORBIDDEN,
        CoreError::Database(_) | CoreError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::Core(e) => {
                let status = core_status(&e);
                if status.is_server_error() {
                    tracing::error!("Request failed: {}", e);
                }
                let msg = match status {
                    StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
                    StatusCode::BAD_GATEWAY => "quote service unavailable, try again".to_string(),
                    _ => e.to_string(),
                };
                (status, msg)
            }
            ApiError::Auth(e) => return e.into_response(),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Malformed request bodies are input errors like any other.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
