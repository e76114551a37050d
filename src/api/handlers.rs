//! API Handlers
//!
//! HTTP request handlers for each feed cache endpoint.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::cache::StaleWhileRevalidateCache;
use crate::error::Result;
use crate::models::{HealthResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// The cache is cheap to clone; every clone shares the same store handle.
#[derive(Clone)]
pub struct AppState {
    pub cache: StaleWhileRevalidateCache,
}

impl AppState {
    pub fn new(cache: StaleWhileRevalidateCache) -> Self {
        Self { cache }
    }
}

/// Handler for GET /stations
///
/// Returns the feed body byte for byte as the upstream sent it; any failure
/// becomes a generic 500.
pub async fn stations_handler(State(state): State<AppState>) -> Result<Response> {
    info!("Requested /stations");
    let payload = state.cache.get().await?;
    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        payload.into_string(),
    )
        .into_response())
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
