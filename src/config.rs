//! Configuration Module
//!
//! Handles loading and validating server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Upstream feed queried on cache miss or staleness.
pub const DEFAULT_UPSTREAM_URL: &str = "https://sedeaplicaciones.minetur.gob.es/ServiciosRESTCarburantes/PreciosCarburantes/EstacionesTerrestres/";

/// Which store implementation backs the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Shared Redis instance
    Redis,
    /// Process-local map, lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(CacheError::InvalidConfig(format!(
                "Unknown store backend '{}'",
                other
            ))),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Upstream feed URL
    pub upstream_url: String,
    /// Store implementation
    pub store_backend: StoreBackend,
    /// Redis connection URL
    pub redis_url: String,
    /// Key under which the single entry is stored
    pub cache_key: String,
    /// Age in seconds after which the cached entry is stale
    pub freshness_window: u64,
    /// Expiry in seconds applied by the store on every write
    pub store_ttl: u64,
    /// Upstream request timeout in seconds
    pub fetch_timeout: u64,
    /// Memory-store cleanup interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `UPSTREAM_URL` - Feed URL (default: the minetur station listing)
    /// - `STORE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `REDIS_URL` - Redis URL (default: redis://localhost:6379)
    /// - `CACHE_KEY` - Store key (default: stations_data)
    /// - `FRESHNESS_WINDOW_SECS` - Staleness threshold (default: 1800)
    /// - `STORE_TTL_SECS` - Store expiry (default: 3600)
    /// - `FETCH_TIMEOUT_SECS` - Upstream timeout (default: 30)
    /// - `CLEANUP_INTERVAL` - Memory-store sweep frequency (default: 1)
    ///
    /// An unrecognised `STORE_BACKEND` is an error; malformed numbers fall
    /// back to their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to
    /// its value. Same names and fallbacks as [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let parse = |name: &str| -> Option<u64> { lookup(name).and_then(|v| v.parse().ok()) };

        let store_backend = match lookup("STORE_BACKEND") {
            Some(v) => v.parse()?,
            None => defaults.store_backend,
        };

        Ok(Self {
            server_port: parse("PORT")
                .and_then(|port| u16::try_from(port).ok())
                .unwrap_or(defaults.server_port),
            upstream_url: lookup("UPSTREAM_URL").unwrap_or(defaults.upstream_url),
            store_backend,
            redis_url: lookup("REDIS_URL").unwrap_or(defaults.redis_url),
            cache_key: lookup("CACHE_KEY").unwrap_or(defaults.cache_key),
            freshness_window: parse("FRESHNESS_WINDOW_SECS").unwrap_or(defaults.freshness_window),
            store_ttl: parse("STORE_TTL_SECS").unwrap_or(defaults.store_ttl),
            fetch_timeout: parse("FETCH_TIMEOUT_SECS").unwrap_or(defaults.fetch_timeout),
            cleanup_interval: parse("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        })
    }

    /// Rejects combinations the cache cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.freshness_window == 0 {
            return Err(CacheError::InvalidConfig(
                "FRESHNESS_WINDOW_SECS must be greater than zero".to_string(),
            ));
        }
        if self.store_ttl < self.freshness_window {
            return Err(CacheError::InvalidConfig(format!(
                "STORE_TTL_SECS ({}) must be >= FRESHNESS_WINDOW_SECS ({})",
                self.store_ttl, self.freshness_window
            )));
        }
        if self.cache_key.is_empty() {
            return Err(CacheError::InvalidConfig(
                "CACHE_KEY cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn freshness_window(&self) -> Duration {
        Duration::from_secs(self.freshness_window)
    }

    pub fn store_ttl(&self) -> Duration {
        Duration::from_secs(self.store_ttl)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            store_backend: StoreBackend::Redis,
            redis_url: "redis://localhost:6379".to_string(),
            cache_key: "stations_data".to_string(),
            freshness_window: 1800,
            store_ttl: 3600,
            fetch_timeout: 30,
            cleanup_interval: 1,
        }
    }
}
