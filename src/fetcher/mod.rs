//! Fetcher Module
//!
//! The upstream source of fresh payloads.

mod http;

use async_trait::async_trait;

use crate::cache::Payload;
use crate::error::Result;

pub use self::http::HttpFetcher;

/// Produces a fresh payload from the upstream.
///
/// Failures are `CacheError::UpstreamFetch`. Implementations carry their own
/// timeout; callers never retry.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self) -> Result<Payload>;
}
