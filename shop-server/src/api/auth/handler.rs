//! Authentication Handlers
//!
//! Thin pass-through to the session provider; the server never sees
//! password hashes, only the provider's tokens.

use axum::{Json, extract::State, http::HeaderMap, http::header};
use serde::Deserialize;

use crate::auth::{CurrentUser, Session, extract_bearer};
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login - 登录
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<Credentials>,
) -> AppResult<Json<AppResponse<Session>>> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }
    let session = state.auth.sign_in(&req.email, &req.password).await?;
    tracing::info!(user = %session.user.id, "user logged in");
    Ok(ok(session))
}

/// POST /api/auth/signup - 注册
pub async fn signup(
    State(state): State<ServerState>,
    Json(req): Json<Credentials>,
) -> AppResult<Json<AppResponse<Session>>> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }
    let session = state.auth.sign_up(&req.email, &req.password).await?;
    tracing::info!(user = %session.user.id, "user signed up");
    Ok(ok(session))
}

/// POST /api/auth/logout - 登出
pub async fn logout(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> AppResult<Json<AppResponse<()>>> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(extract_bearer)
        .ok_or(AppError::Unauthorized)?;
    state.auth.sign_out(token).await?;
    Ok(ok_with_message((), "Signed out"))
}

/// GET /api/auth/me - 当前用户信息
pub async fn me(user: CurrentUser) -> Json<AppResponse<CurrentUser>> {
    ok(user)
}
