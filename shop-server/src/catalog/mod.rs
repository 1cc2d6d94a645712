//! Catalog core
//!
//! The read-path pipeline: aggregate (fetch + merge + validate +
//! sort), filter/sort engine, incremental pagination, and the legacy
//! dataset adapter.

pub mod aggregate;
pub mod filter;
pub mod legacy;
pub mod paginate;

pub use aggregate::get_all_shops;
pub use filter::filter_shops;
pub use paginate::{PAGE_SIZE, Paginator};
