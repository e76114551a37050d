//! Store Module
//!
//! Key-value persistence with expiry for the cached entry.

mod memory;
mod redis;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

/// Key-value store with per-write expiry.
///
/// Values are opaque strings; encoding is the caller's concern.
#[async_trait]
pub trait Store: Send + Sync {
    /// Returns the value under `key`, or `None` if absent or expired.
    ///
    /// Connectivity failures are `CacheError::StoreUnavailable`, never `None`.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the value under `key`, expiring it after `ttl`.
    async fn write(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;
}
