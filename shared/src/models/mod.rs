//! Data models
//!
//! Shared between shop-server and frontend (via API).
//! Row ids are `i64`; positive ids are native store rows, negative
//! ids are synthesized legacy identities.

pub mod shop;

// Re-exports
pub use shop::*;
