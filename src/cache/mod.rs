//! Cache Module
//!
//! Stale-while-revalidate caching of the upstream feed.

mod entry;
mod payload;
mod stats;
mod swr;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use payload::Payload;
pub use stats::{CacheStats, StatsRecorder};
pub use swr::{CacheSettings, StaleWhileRevalidateCache};
