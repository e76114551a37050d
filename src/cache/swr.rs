//! Stale-While-Revalidate Cache
//!
//! Decides, per read, whether to serve the stored entry, serve it and refresh
//! in the background, or fetch synchronously.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{current_timestamp_ms, CacheEntry, CacheStats, Payload, StatsRecorder};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::fetcher::Fetcher;
use crate::store::Store;

// == Cache Settings ==
/// Construction parameters for [`StaleWhileRevalidateCache`].
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Store key of the single entry
    pub key: String,
    /// Age after which the entry is served stale and refreshed
    pub freshness_window: Duration,
    /// Expiry passed to the store on every write
    pub store_ttl: Duration,
}

impl CacheSettings {
    pub fn new(key: impl Into<String>, freshness_window: Duration, store_ttl: Duration) -> Self {
        Self {
            key: key.into(),
            freshness_window,
            store_ttl,
        }
    }
}

impl From<&Config> for CacheSettings {
    fn from(config: &Config) -> Self {
        Self::new(
            config.cache_key.clone(),
            config.freshness_window(),
            config.store_ttl(),
        )
    }
}

// == Stale-While-Revalidate Cache ==
/// Serves the cached feed, refreshing it from the upstream when stale or absent.
///
/// Clones share the same store, fetcher and counters. Concurrent stale reads
/// each start their own refresh; writes replace the whole entry, so the last
/// successful one wins.
#[derive(Clone)]
pub struct StaleWhileRevalidateCache {
    store: Arc<dyn Store>,
    fetcher: Arc<dyn Fetcher>,
    key: Arc<str>,
    freshness_window: Duration,
    store_ttl: Duration,
    stats: Arc<StatsRecorder>,
}

impl StaleWhileRevalidateCache {
    // == Constructor ==
    /// Creates the cache.
    ///
    /// Fails with `InvalidConfig` if the store would evict the entry before it
    /// turns stale (`store_ttl < freshness_window`), or if the window is zero.
    pub fn new(
        store: Arc<dyn Store>,
        fetcher: Arc<dyn Fetcher>,
        settings: CacheSettings,
    ) -> Result<Self> {
        if settings.freshness_window.is_zero() {
            return Err(CacheError::InvalidConfig(
                "freshness window must be greater than zero".to_string(),
            ));
        }
        if settings.store_ttl < settings.freshness_window {
            return Err(CacheError::InvalidConfig(format!(
                "store TTL ({:?}) is shorter than the freshness window ({:?})",
                settings.store_ttl, settings.freshness_window
            )));
        }

        Ok(Self {
            store,
            fetcher,
            key: settings.key.into(),
            freshness_window: settings.freshness_window,
            store_ttl: settings.store_ttl,
            stats: Arc::new(StatsRecorder::new()),
        })
    }

    // == Get ==
    /// Returns the best available payload.
    ///
    /// - absent: fetches synchronously, surfacing `UpstreamFetch` on failure
    /// - fresh: returns the cached payload
    /// - stale: returns the cached payload and spawns one background refresh
    ///
    /// A store read failure is returned as `StoreUnavailable` without
    /// contacting the upstream.
    pub async fn get(&self) -> Result<Payload> {
        let Some(entry) = self.read_entry().await? else {
            info!("No cache found, fetching data");
            self.stats.record_miss();
            return self
                .fetch_and_store()
                .await
                .inspect_err(|_| self.stats.record_fetch_failure());
        };

        if entry.is_fresh_at(current_timestamp_ms(), self.freshness_window) {
            debug!("Returning cached data");
            self.stats.record_fresh_hit();
        } else {
            info!(
                age_ms = entry.age_ms(current_timestamp_ms()),
                "Cache stale, refreshing in background"
            );
            self.stats.record_stale_hit();
            self.refresh_in_background();
        }

        Ok(entry.payload)
    }

    // == Background Refresh ==
    /// Spawns a fetch-and-store cycle on the runtime.
    ///
    /// The refresh outcome never reaches a reader: failures are logged and
    /// dropped here, leaving the previous entry in place.
    pub fn refresh_in_background(&self) -> JoinHandle<()> {
        self.stats.record_refresh();
        let cache = self.clone();

        tokio::spawn(async move {
            if let Err(e) = cache.fetch_and_store().await {
                cache.stats.record_refresh_failure();
                warn!("Background refresh failed: {}", e);
            }
        })
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads and decodes the entry; an undecodable value reads as absent.
    async fn read_entry(&self) -> Result<Option<CacheEntry>> {
        let Some(raw) = self.store.read(&self.key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                warn!("Discarding undecodable cache entry under '{}': {}", self.key, e);
                Ok(None)
            }
        }
    }

    /// Fetches from the upstream and writes the result.
    ///
    /// Nothing is written when the fetch fails. A failed write is logged and
    /// the fetched payload is still returned.
    async fn fetch_and_store(&self) -> Result<Payload> {
        let entry = CacheEntry::new(self.fetcher.fetch().await?);

        match serde_json::to_string(&entry) {
            Ok(encoded) => match self.store.write(&self.key, &encoded, self.store_ttl).await {
                Ok(()) => info!("Data fetched and cached"),
                Err(e) => warn!("Fetched data could not be cached: {}", e),
            },
            Err(e) => warn!("Fetched data could not be encoded: {}", e),
        }

        Ok(entry.payload)
    }
}
