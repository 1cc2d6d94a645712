//! Authentication collaborator
//!
//! The session provider is an external service; the core only needs
//! "who is the current user" plus the session entry points. Write
//! paths require a resolved [`CurrentUser`] before touching the
//! store.

mod extractor;
mod gateway;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::utils::AppResult;

pub use gateway::{MemoryAuth, RestAuth};

/// Identity returned by the auth provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// An authenticated session (bearer token + identity).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: UserIdentity,
}

/// Session-based auth provider contract.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Resolve a bearer token; `None` when the token is unknown or expired.
    async fn get_user(&self, token: &str) -> AppResult<Option<UserIdentity>>;

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session>;

    async fn sign_up(&self, email: &str, password: &str) -> AppResult<Session>;

    async fn sign_out(&self, token: &str) -> AppResult<()>;
}

/// Authenticated user extracted from the request.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: Option<String>,
}

impl From<UserIdentity> for CurrentUser {
    fn from(user: UserIdentity) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_extraction() {
        assert_eq!(extract_bearer("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer("Basic abc123"), None);
        assert_eq!(extract_bearer("Bearer "), None);
    }
}
