//! Primary store collaborator
//!
//! Row-level access to the hosted `shops` table behind the
//! [`ShopStore`] trait. The core never implements storage itself:
//! [`RestStore`] talks to the hosted PostgREST-style API, and
//! [`MemoryStore`] is the in-process table used for development and
//! tests. Instances are constructed from configuration and injected
//! through `ServerState` — no module-level singletons.

mod memory;
mod rest;

use async_trait::async_trait;
use serde::Deserialize;

use crate::utils::AppError;
use shared::{Shop, ShopInsert, ShopUpdate};

pub use memory::MemoryStore;
pub use rest::RestStore;

/// Error code the hosted API uses for "no matching row".
pub const CODE_NO_ROWS: &str = "PGRST116";

/// Postgres unique-constraint violation.
pub const CODE_UNIQUE_VIOLATION: &str = "23505";

/// Structured store error with the remote error code when one exists.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    pub code: Option<String>,
    pub message: String,
}

impl StoreError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    pub fn no_rows(message: impl Into<String>) -> Self {
        Self::with_code(CODE_NO_ROWS, message)
    }

    pub fn is_no_rows(&self) -> bool {
        self.code.as_deref() == Some(CODE_NO_ROWS)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e.code.as_deref() {
            Some(CODE_NO_ROWS) => AppError::not_found(e.message),
            Some(CODE_UNIQUE_VIOLATION) => {
                AppError::conflict("A shop with this name or URL might already exist")
            }
            _ => AppError::store(e.message),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Projection used by the options endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionColumns {
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub area_category: Option<String>,
}

/// Row-level operations on the `shops` table.
#[async_trait]
pub trait ShopStore: Send + Sync {
    /// Fetch every row. Callers must not assume caching.
    async fn select_all(&self) -> StoreResult<Vec<Shop>>;

    /// Fetch only the `genre` / `area_category` columns.
    async fn select_option_columns(&self) -> StoreResult<Vec<OptionColumns>>;

    /// Fetch one row by id, `None` when no row matches.
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Shop>>;

    /// Insert a row and return it.
    async fn insert(&self, data: ShopInsert) -> StoreResult<Shop>;

    /// Update a row and return it; [`CODE_NO_ROWS`] when absent.
    async fn update(&self, id: i64, data: ShopUpdate) -> StoreResult<Shop>;

    /// Delete a row; [`CODE_NO_ROWS`] when absent.
    async fn delete(&self, id: i64) -> StoreResult<()>;
}
