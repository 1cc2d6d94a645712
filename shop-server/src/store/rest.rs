//! PostgREST-style HTTP store client
//!
//! Talks to the hosted relational store over its REST surface.
//! Constructed per process from configuration (endpoint + anon key),
//! injected through `ServerState`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode, header};
use serde::Deserialize;

use super::{OptionColumns, ShopStore, StoreError, StoreResult};
use shared::{Shop, ShopInsert, ShopUpdate};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body shape returned by the hosted API.
#[derive(Debug, Deserialize)]
struct RemoteError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
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

    fn table_url(&self) -> String {
        format!("{}/rest/v1/shops", self.base_url)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
    }

    /// Map a non-success response to a `StoreError`, keeping the
    /// remote error code when the body carries one.
    async fn error_from(resp: Response) -> StoreError {
        let status = resp.status();
        match resp.json::<RemoteError>().await {
            Ok(body) => StoreError {
                code: body.code,
                message: body
                    .message
                    .unwrap_or_else(|| format!("store request failed with status {status}")),
            },
            Err(_) => StoreError::transport(format!("store request failed with status {status}")),
        }
    }

    async fn expect_rows<T: serde::de::DeserializeOwned>(resp: Response) -> StoreResult<T> {
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        resp.json::<T>()
            .await
            .map_err(|e| StoreError::transport(format!("failed to decode store response: {e}")))
    }
}

#[async_trait]
impl ShopStore for RestStore {
    async fn select_all(&self) -> StoreResult<Vec<Shop>> {
        let resp = self
            .authed(self.client.get(self.table_url()).query(&[("select", "*")]))
            .send()
            .await
            .map_err(|e| StoreError::transport(e.to_string()))?;
        Self::expect_rows(resp).await
    }

    async fn select_option_columns(&self) -> StoreResult<Vec<OptionColumns>> {
        let resp = self
            .authed(
                self.client
                    .get(self.table_url())
                    .query(&[("select", "genre,area_category")]),
            )
            .send()
            .await
            .map_err(|e| StoreError::transport(e.to_string()))?;
        Self::expect_rows(resp).await
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Shop>> {
        let resp = self
            .authed(
                self.client
                    .get(self.table_url())
                    .query(&[("id", format!("eq.{id}").as_str()), ("limit", "1")]),
            )
            .send()
            .await
            .map_err(|e| StoreError::transport(e.to_string()))?;
        let rows: Vec<Shop> = Self::expect_rows(resp).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, data: ShopInsert) -> StoreResult<Shop> {
        let resp = self
            .authed(self.client.post(self.table_url()).json(&data))
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|e| StoreError::transport(e.to_string()))?;
        if resp.status() == StatusCode::CONFLICT {
            return Err(Self::error_from(resp).await);
        }
        let rows: Vec<Shop> = Self::expect_rows(resp).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::transport("insert returned no representation"))
    }

    async fn update(&self, id: i64, data: ShopUpdate) -> StoreResult<Shop> {
        let resp = self
            .authed(
                self.client
                    .patch(self.table_url())
                    .query(&[("id", format!("eq.{id}"))])
                    .json(&data),
            )
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|e| StoreError::transport(e.to_string()))?;
        let rows: Vec<Shop> = Self::expect_rows(resp).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::no_rows(format!("Shop {id} not found")))
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let resp = self
            .authed(
                self.client
                    .delete(self.table_url())
                    .query(&[("id", format!("eq.{id}"))]),
            )
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|e| StoreError::transport(e.to_string()))?;
        let rows: Vec<Shop> = Self::expect_rows(resp).await?;
        if rows.is_empty() {
            return Err(StoreError::no_rows(format!("Shop {id} not found")));
        }
        Ok(())
    }
}
