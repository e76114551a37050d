//! Memory Store Module
//!
//! Process-local store with TTL expiration, used when no Redis is available.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::current_timestamp_ms;
use crate::error::Result;
use crate::store::Store;

// == Stored Value ==
#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    /// Expiration timestamp (Unix milliseconds)
    expires_at: u64,
}

impl StoredValue {
    /// Expired once the current time reaches `expires_at`.
    fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }
}

// == Memory Store ==
/// HashMap-backed store; expired values are dropped on read and by cleanup.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredValue>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired values.
    ///
    /// Returns the number of values removed.
    pub async fn cleanup_expired(&self) -> usize {
        let now = current_timestamp_ms();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, stored| !stored.is_expired(now));
        before - entries.len()
    }

    // == Length ==
    /// Returns the number of values held, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let now = current_timestamp_ms();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(stored) if !stored.is_expired(now) => return Ok(Some(stored.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Expired: drop it unless a writer replaced it in the meantime
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|stored| stored.is_expired(now)) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn write(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let expires_at = current_timestamp_ms().saturating_add(ttl.as_millis() as u64);
        self.entries.write().await.insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }
}
