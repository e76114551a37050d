//! Error types for the feed cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Message returned to HTTP clients for every failure.
pub const GENERIC_ERROR_MESSAGE: &str = "Failed to fetch station data";

// == Cache Error Enum ==
/// Unified error type for the feed cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The upstream fetch failed (network, non-success status, timeout, bad body)
    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(String),

    /// The store could not be read or written
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Rejected configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);

        let body = Json(ErrorResponse::new(GENERIC_ERROR_MESSAGE));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the feed cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_maps_to_500() {
        let errors = vec![
            CacheError::UpstreamFetch("timeout".to_string()),
            CacheError::StoreUnavailable("connection refused".to_string()),
            CacheError::InvalidConfig("bad".to_string()),
        ];

        for err in errors {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_display_includes_detail() {
        let err = CacheError::StoreUnavailable("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
