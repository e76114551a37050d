//! Response DTOs for the feed cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads served from a fresh entry
    pub fresh_hits: u64,
    /// Reads served from a stale entry
    pub stale_hits: u64,
    /// Reads that fetched synchronously
    pub misses: u64,
    /// Background refreshes started
    pub refreshes: u64,
    /// Background refreshes that failed
    pub refresh_failures: u64,
    /// Synchronous fetches that failed
    pub fetch_failures: u64,
    /// Hit rate ((fresh + stale) / reads)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            fresh_hits: stats.fresh_hits,
            stale_hits: stats.stale_hits,
            misses: stats.misses,
            refreshes: stats.refreshes,
            refresh_failures: stats.refresh_failures,
            fetch_failures: stats.fetch_failures,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_response_from_stats() {
        let stats = CacheStats {
            fresh_hits: 6,
            stale_hits: 2,
            misses: 2,
            refreshes: 2,
            refresh_failures: 1,
            fetch_failures: 0,
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.refresh_failures, 1);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::from(CacheStats::default());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Failed to fetch station data");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"error":"Failed to fetch station data"}"#);
    }
}
