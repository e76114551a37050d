//! Cache Entry Module
//!
//! Defines the record persisted in the store and its freshness check.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::cache::Payload;

// == Cache Entry ==
/// The result of one successful upstream fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Upstream body, stored untouched
    pub payload: Payload,
    /// Fetch timestamp (Unix milliseconds)
    pub fetched_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    pub fn new(payload: Payload) -> Self {
        Self {
            payload,
            fetched_at: current_timestamp_ms(),
        }
    }

    // == Age ==
    /// Milliseconds elapsed between `fetched_at` and `now_ms`.
    ///
    /// A `fetched_at` in the future (clock skew between writers) counts as age 0.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.fetched_at)
    }

    // == Is Fresh ==
    /// Checks whether the entry is still within the freshness window.
    ///
    /// Boundary condition: an entry whose age equals the window exactly is
    /// still fresh; it turns stale only once the age exceeds the window.
    pub fn is_fresh_at(&self, now_ms: u64, freshness_window: Duration) -> bool {
        u128::from(self.age_ms(now_ms)) <= freshness_window.as_millis()
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A system clock set before the epoch reads as 0.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const WINDOW: Duration = Duration::from_secs(30 * 60);

    #[test]
    fn test_entry_creation() {
        let before = current_timestamp_ms();
        let entry = CacheEntry::new(Payload::from(json!({"id": 1})));
        let after = current_timestamp_ms();

        assert_eq!(entry.payload.as_str(), r#"{"id":1}"#);
        assert!(entry.fetched_at >= before && entry.fetched_at <= after);
    }

    #[test]
    fn test_entry_fresh_when_recent() {
        let now = current_timestamp_ms();
        let entry = CacheEntry {
            payload: Payload::from(json!(null)),
            fetched_at: now - 5 * 60 * 1000,
        };
        assert!(entry.is_fresh_at(now, WINDOW));
    }

    #[test]
    fn test_entry_stale_when_old() {
        let now = current_timestamp_ms();
        let entry = CacheEntry {
            payload: Payload::from(json!(null)),
            fetched_at: now - 40 * 60 * 1000,
        };
        assert!(!entry.is_fresh_at(now, WINDOW));
    }

    #[test]
    fn test_freshness_boundary_condition() {
        let now = 10_000_000;
        let window_ms = WINDOW.as_millis() as u64;

        let at_boundary = CacheEntry {
            payload: Payload::from(json!(null)),
            fetched_at: now - window_ms,
        };
        assert!(at_boundary.is_fresh_at(now, WINDOW), "Age == window is fresh");

        let past_boundary = CacheEntry {
            payload: Payload::from(json!(null)),
            fetched_at: now - window_ms - 1,
        };
        assert!(!past_boundary.is_fresh_at(now, WINDOW));
    }

    #[test]
    fn test_future_timestamp_counts_as_fresh() {
        let entry = CacheEntry {
            payload: Payload::from(json!(null)),
            fetched_at: 2_000,
        };
        assert_eq!(entry.age_ms(1_000), 0);
        assert!(entry.is_fresh_at(1_000, WINDOW));
    }

    #[test]
    fn test_serialized_layout() {
        let entry = CacheEntry {
            payload: Payload::from_json(r#"{"ListaEESSPrecio":[],"Acc":1.459}"#).unwrap(),
            fetched_at: 42,
        };
        let encoded = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            encoded,
            r#"{"payload":{"ListaEESSPrecio":[],"Acc":1.459},"fetched_at":42}"#
        );

        let decoded: CacheEntry = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, entry);
    }
}
