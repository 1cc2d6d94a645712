//! Shared types for the shop directory
//!
//! Data models and query types used by the server (and any future
//! client crate): the persisted shop row, the user-submitted form,
//! and the list query parameters.

pub mod models;
pub mod query;

// Re-exports
pub use models::{Recommender, Shop, ShopForm, ShopInsert, ShopUpdate, Visitor};
pub use models::{LEGACY_EPOCH, TAKEMACHELIN_GENRE};
pub use query::ShopQuery;
pub use serde::{Deserialize, Serialize};
