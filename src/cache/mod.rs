//! Cache Module
//!
//! Provides an in-memory memoization cache with per-entry TTL expiration,
//! FIFO eviction at a fixed capacity, and hit/miss statistics.

mod bounded;
mod entry;
mod order;
mod stats;
mod store;
mod timers;


// Re-export public types
pub use bounded::BoundedTtlCache;
pub use entry::CacheEntry;
pub use order::InsertionOrder;
pub use stats::{CacheStats, CacheStatsSnapshot};
pub use store::{CacheStore, Lookup};
pub use timers::ExpiryTimers;

use std::time::Duration;

// == Public Constants ==
/// Capacity used when none is configured
pub const DEFAULT_MAX_SIZE: usize = 50;

/// Expiry window used when `set` is called without a TTL
pub const DEFAULT_TTL: Duration = Duration::from_millis(300_000);
