//! Cache Statistics Module
//!
//! Tracks which path each read took and how refreshes ended.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Stats Recorder ==
/// Lock-free counters shared by every clone of the cache.
#[derive(Debug, Default)]
pub struct StatsRecorder {
    fresh_hits: AtomicU64,
    stale_hits: AtomicU64,
    misses: AtomicU64,
    refreshes: AtomicU64,
    refresh_failures: AtomicU64,
    fetch_failures: AtomicU64,
}

impl StatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_fresh_hit(&self) {
        self.fresh_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_hit(&self) {
        self.stale_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a background refresh being spawned.
    pub fn record_refresh(&self) {
        self.refreshes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_refresh_failure(&self) {
        self.refresh_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a failed synchronous fetch (the caller saw the error).
    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Copies the current counter values.
    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            fresh_hits: self.fresh_hits.load(Ordering::Relaxed),
            stale_hits: self.stale_hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            refreshes: self.refreshes.load(Ordering::Relaxed),
            refresh_failures: self.refresh_failures.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
        }
    }
}

// == Cache Stats ==
/// Point-in-time view of the counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads served from a fresh entry
    pub fresh_hits: u64,
    /// Reads served from a stale entry
    pub stale_hits: u64,
    /// Reads that found no entry and fetched synchronously
    pub misses: u64,
    /// Background refreshes spawned
    pub refreshes: u64,
    /// Background refreshes that failed
    pub refresh_failures: u64,
    /// Synchronous fetches that failed
    pub fetch_failures: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Stale reads count as hits. Returns 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.fresh_hits + self.stale_hits;
        let total = hits + self.misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = StatsRecorder::new().snapshot();
        assert_eq!(stats, CacheStats::default());
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = StatsRecorder::new().snapshot();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_counts_stale_as_hit() {
        let recorder = StatsRecorder::new();
        recorder.record_fresh_hit();
        recorder.record_stale_hit();
        recorder.record_miss();
        recorder.record_miss();
        assert_eq!(recorder.snapshot().hit_rate(), 0.5);
    }

    #[test]
    fn test_refresh_counters() {
        let recorder = StatsRecorder::new();
        recorder.record_refresh();
        recorder.record_refresh();
        recorder.record_refresh_failure();
        recorder.record_fetch_failure();

        let stats = recorder.snapshot();
        assert_eq!(stats.refreshes, 2);
        assert_eq!(stats.refresh_failures, 1);
        assert_eq!(stats.fetch_failures, 1);
    }
}
