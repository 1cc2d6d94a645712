//! Auth Extractor
//!
//! Custom extractor that resolves the bearer token through the auth
//! gateway. Use it in protected handlers; unauthenticated requests
//! are rejected before the handler body runs.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{CurrentUser, extract_bearer};
use crate::core::ServerState;
use crate::utils::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted earlier in the request
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => extract_bearer(header)
                .ok_or_else(|| AppError::validation("Invalid authorization header"))?,
            None => {
                tracing::warn!(uri = %parts.uri, "request without credentials on protected route");
                return Err(AppError::unauthorized());
            }
        };

        match state.auth.get_user(token).await? {
            Some(identity) => {
                let user = CurrentUser::from(identity);
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            None => {
                tracing::warn!(uri = %parts.uri, "unknown or expired session token");
                Err(AppError::unauthorized())
            }
        }
    }
}
