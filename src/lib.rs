//! Feed Cache - A caching reverse-proxy for a single upstream feed
//!
//! Serves the cached feed immediately and refreshes it from the upstream in
//! the background once it turns stale (stale-while-revalidate).

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheSettings, StaleWhileRevalidateCache};
pub use config::Config;
pub use error::CacheError;
pub use tasks::spawn_cleanup_task;
