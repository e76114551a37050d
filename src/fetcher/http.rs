//! HTTP Fetcher
//!
//! Retrieves the feed with a single `GET` through reqwest.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::cache::Payload;
use crate::error::{CacheError, Result};
use crate::fetcher::Fetcher;

/// Fetches the upstream feed over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpFetcher {
    /// Builds the client once; `timeout` bounds each request end to end.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CacheError::InvalidConfig(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self) -> Result<Payload> {
        info!("Fetching data from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CacheError::UpstreamFetch(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| CacheError::UpstreamFetch(format!("Failed to read response body: {}", e)))?;
        let payload = Payload::from_json(body)
            .map_err(|e| CacheError::UpstreamFetch(format!("Invalid response body: {}", e)))?;

        debug!("Upstream fetch complete");
        Ok(payload)
    }
}
