//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired memory-store entries at configured intervals
//!
//! Cache refreshes are spawned per stale read by the cache itself.

mod cleanup;

pub use cleanup::spawn_cleanup_task;
