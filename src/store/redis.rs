//! Redis Store Module
//!
//! Shared store backed by Redis `GET` / `SET EX`.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::info;

use crate::error::{CacheError, Result};
use crate::store::Store;

/// Redis-backed store.
///
/// The connection is opened once and the `ConnectionManager` is cloned per
/// call; it reconnects on its own after a dropped connection.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
    key_prefix: Option<String>,
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore")
            .field("key_prefix", &self.key_prefix)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisStore {
    /// Connects to the Redis instance at `url`.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url).map_err(|e| {
            CacheError::StoreUnavailable(format!("Failed to create Redis client: {}", e))
        })?;

        let connection = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::StoreUnavailable(format!("Failed to connect to Redis: {}", e))
        })?;

        info!("Connected to Redis at {}", url);
        Ok(Self {
            connection,
            key_prefix: None,
        })
    }

    /// Namespaces every key as `<prefix>:<key>`.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    fn prefix_key(&self, key: &str) -> String {
        prefixed(self.key_prefix.as_deref(), key)
    }
}

fn prefixed(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, key),
        None => key.to_string(),
    }
}

/// Redis `EX` takes whole seconds and rejects 0.
///
/// Rounds up, so the key never expires before `ttl` has elapsed.
fn ttl_secs(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis().div_ceil(1000))
        .unwrap_or(u64::MAX)
        .max(1)
}

#[async_trait]
impl Store for RedisStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection.clone();

        let value: Option<String> = conn.get(self.prefix_key(key)).await.map_err(|e| {
            CacheError::StoreUnavailable(format!("Failed to get key '{}': {}", key, e))
        })?;

        Ok(value)
    }

    async fn write(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.connection.clone();

        let _: () = conn
            .set_ex(self.prefix_key(key), value, ttl_secs(ttl))
            .await
            .map_err(|e| {
                CacheError::StoreUnavailable(format!("Failed to set key '{}': {}", key, e))
            })?;

        Ok(())
    }
}
