//! API Module
//!
//! HTTP handlers and routing for the feed cache.
//!
//! # Endpoints
//! - `GET /stations` - Cached upstream feed, served stale-while-revalidate
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
