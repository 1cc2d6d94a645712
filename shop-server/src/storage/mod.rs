//! Object storage collaborator
//!
//! Blobs go in, public URLs come out; the `images` field only ever
//! holds the resulting URL strings. [`RestStorage`] targets the
//! hosted bucket API, [`MemoryStorage`] keeps blobs in-process for
//! development and tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;

use crate::utils::{AppError, AppResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Blob storage contract: store under a key, resolve a public URL.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn store(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<()>;

    fn public_url(&self, key: &str) -> String;
}

/// Hosted bucket API client.
#[derive(Clone)]
pub struct RestStorage {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl RestStorage {
    pub fn new(base_url: &str, api_key: &str, bucket: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            bucket: bucket.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStorage for RestStorage {
    async fn store(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<()> {
        let url = format!("{}/storage/v1/object/{}/{key}", self.base_url, self.bucket);
        let resp = self
            .client
            .post(url)
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, content_type.to_string())
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("storage request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(AppError::internal(format!(
                "storage upload failed with status {}",
                resp.status()
            )));
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{key}",
            self.base_url, self.bucket
        )
    }
}

/// In-process blob store for dev and tests.
#[derive(Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn store(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> AppResult<()> {
        self.blobs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), bytes);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://storage.invalid/public/{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_storage_stores_and_resolves() {
        let storage = MemoryStorage::new();
        storage
            .store("2024/abc.jpg", vec![1, 2, 3], "image/jpeg")
            .await
            .unwrap();
        let url = storage.public_url("2024/abc.jpg");
        assert!(url.ends_with("2024/abc.jpg"));
        assert!(url::Url::parse(&url).is_ok());
    }
}
