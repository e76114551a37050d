//! Response models for the feed cache API
//!
//! Defines the DTOs serialized into HTTP response bodies. The feed itself is
//! passed through untyped.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
