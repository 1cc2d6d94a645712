//! Auth gateway implementations
//!
//! [`RestAuth`] proxies the hosted session API; [`MemoryAuth`] issues
//! opaque tokens against configured dev credentials so the server
//! works without the hosted provider.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;
use uuid::Uuid;

use super::{AuthGateway, Session, UserIdentity};
use crate::utils::{AppError, AppResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Hosted session provider client.
#[derive(Clone)]
pub struct RestAuth {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: UserIdentity,
}

impl RestAuth {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    fn authed(&self, req: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
        let bearer = token.unwrap_or(&self.api_key);
        req.header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
    }
}

#[async_trait]
impl AuthGateway for RestAuth {
    async fn get_user(&self, token: &str) -> AppResult<Option<UserIdentity>> {
        let resp = self
            .authed(self.client.get(self.endpoint("user")), Some(token))
            .send()
            .await
            .map_err(|e| AppError::internal(format!("auth request failed: {e}")))?;
        if !resp.status().is_success() {
            return Ok(None);
        }
        let user = resp
            .json::<UserIdentity>()
            .await
            .map_err(|e| AppError::internal(format!("failed to decode auth response: {e}")))?;
        Ok(Some(user))
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        let resp = self
            .authed(
                self.client
                    .post(self.endpoint("token"))
                    .query(&[("grant_type", "password")])
                    .json(&serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .send()
            .await
            .map_err(|e| AppError::internal(format!("auth request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(AppError::invalid_credentials());
        }
        let token = resp
            .json::<TokenResponse>()
            .await
            .map_err(|e| AppError::internal(format!("failed to decode auth response: {e}")))?;
        Ok(Session {
            access_token: token.access_token,
            user: token.user,
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> AppResult<Session> {
        let resp = self
            .authed(
                self.client
                    .post(self.endpoint("signup"))
                    .json(&serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .send()
            .await
            .map_err(|e| AppError::internal(format!("auth request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(AppError::invalid("Sign-up was rejected".to_string()));
        }
        let token = resp
            .json::<TokenResponse>()
            .await
            .map_err(|e| AppError::internal(format!("failed to decode auth response: {e}")))?;
        Ok(Session {
            access_token: token.access_token,
            user: token.user,
        })
    }

    async fn sign_out(&self, token: &str) -> AppResult<()> {
        let resp = self
            .authed(self.client.post(self.endpoint("logout")), Some(token))
            .send()
            .await
            .map_err(|e| AppError::internal(format!("auth request failed: {e}")))?;
        if !resp.status().is_success() {
            tracing::warn!(status = %resp.status(), "sign-out rejected by auth provider");
        }
        Ok(())
    }
}

/// Dev/test auth provider with a single configured account.
pub struct MemoryAuth {
    email: String,
    password: String,
    sessions: Mutex<HashMap<String, UserIdentity>>,
}

impl MemoryAuth {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn issue(&self, email: &str) -> Session {
        let user = UserIdentity {
            id: Uuid::new_v4().to_string(),
            email: Some(email.to_string()),
        };
        let token = Uuid::new_v4().to_string();
        self.sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.clone(), user.clone());
        Session {
            access_token: token,
            user,
        }
    }
}

#[async_trait]
impl AuthGateway for MemoryAuth {
    async fn get_user(&self, token: &str) -> AppResult<Option<UserIdentity>> {
        Ok(self
            .sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(token)
            .cloned())
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        if email == self.email && password == self.password {
            Ok(self.issue(email))
        } else {
            Err(AppError::invalid_credentials())
        }
    }

    async fn sign_up(&self, email: &str, _password: &str) -> AppResult<Session> {
        // Dev mode: sign-up just issues a session for the given address.
        Ok(self.issue(email))
    }

    async fn sign_out(&self, token: &str) -> AppResult<()> {
        self.sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_auth_round_trip() {
        let auth = MemoryAuth::new("dev@example.com", "devpass");
        let session = auth.sign_in("dev@example.com", "devpass").await.unwrap();
        let user = auth.get_user(&session.access_token).await.unwrap();
        assert!(user.is_some());

        auth.sign_out(&session.access_token).await.unwrap();
        assert!(auth.get_user(&session.access_token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn memory_auth_rejects_bad_credentials() {
        let auth = MemoryAuth::new("dev@example.com", "devpass");
        assert!(auth.sign_in("dev@example.com", "wrong").await.is_err());
    }
}
