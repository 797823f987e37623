use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension, Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};

/// Issues and checks HS256 access tokens.
///
/// Logged-out tokens are remembered by `jti` until they would have expired.
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
    revoked: Mutex<HashMap<String, usize>>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    code: u16,
    message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,
}

/// The caller identity established by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub token_id: String,
    pub expires_at: usize,
}

fn now_secs() -> Result<usize, AuthError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))
}

impl AuthManager {
    pub fn new(secret: &[u8], token_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            token_ttl,
            revoked: Mutex::new(HashMap::new()),
        }
    }

    pub fn issue_token(&self, user_id: i32) -> Result<String, AuthError> {
        let iat = now_secs()?;
        let claims = Claims {
            sub: user_id.to_string(),
            iat,
            exp: iat.saturating_add(
                usize::try_from(self.token_ttl.as_secs()).unwrap_or(usize::MAX),
            ),
            jti: Uuid::new_v4().to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!("Rejected access token: {err}");
                AuthError::Unauthorized
            })?;

        if self.lock_revoked()?.contains_key(&claims.jti) {
            return Err(AuthError::Unauthorized);
        }
        Ok(claims)
    }

    /// Rejects the token from now on. Entries are dropped once expired.
    pub fn revoke(&self, token_id: &str, expires_at: usize) -> Result<(), AuthError> {
        let now = now_secs()?;
        let mut revoked = self.lock_revoked()?;
        revoked.retain(|_, exp| *exp >= now);
        revoked.insert(token_id.to_string(), expires_at);
        Ok(())
    }

    pub fn expires_in(&self) -> Duration {
        self.token_ttl
    }

    fn lock_revoked(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, usize>>, AuthError> {
        self.revoked
            .lock()
            .map_err(|_| AuthError::Internal("revocation list poisoned".into()))
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AuthError::Internal(msg) => {
                tracing::error!("Auth failure: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        let body = Json(AuthErrorBody {
            code: status.as_u16(),
            message,
        });
        (status, body).into_response()
    }
}

/// Accepts base64 of 32 bytes, or a 32-character ASCII string.
pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("JWT secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let Json(payload) = payload?;
    let user = state.user_service.register(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(payload) = payload?;
    let user = state
        .user_service
        .authenticate(payload.username.as_deref(), payload.password.as_deref())?;
    let token = state.auth.issue_token(user.id)?;
    tracing::info!("User {} logged in", user.id);
    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth.expires_in().as_secs(),
    }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<StatusCode> {
    state.auth.revoke(&user.token_id, user.expires_at)?;
    tracing::info!("User {} logged out", user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(request.headers()).ok_or(AuthError::Unauthorized)?;
    let claims = state.auth.validate_token(token)?;
    let user_id: i32 = claims.sub.parse().map_err(|_| AuthError::Unauthorized)?;

    request.extensions_mut().insert(AuthUser {
        user_id,
        token_id: claims.jti,
        expires_at: claims.exp,
    });
    Ok(next.run(request).await)
}
