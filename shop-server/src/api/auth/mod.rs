//! Authentication Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Build authentication router
/// - /api/auth/login, /api/auth/signup: public
/// - /api/auth/me, /api/auth/logout: require a bearer token
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/signup", post(handler::signup))
        .route("/api/auth/logout", post(handler::logout))
        .route("/api/auth/me", get(handler::me))
}
