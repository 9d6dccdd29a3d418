//! Cache Cleanup Task
//!
//! Background task that periodically sweeps expired cache entries. It runs
//! alongside the per-entry timers; whichever removes an entry first wins.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::BoundedTtlCache;

/// Spawns a background task that calls [`BoundedTtlCache::cleanup`] every
/// `cleanup_interval_secs` seconds (minimum one second).
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = BoundedTtlCache::<String>::new(50, Duration::from_secs(300));
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<V>(cache: BoundedTtlCache<V>, cleanup_interval_secs: u64) -> JoinHandle<()>
where
    V: Send + 'static,
{
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup();

            if removed > 0 {
                info!("Cache cleanup: removed {} expired entries", removed);
            } else {
                debug!("Cache cleanup: no expired entries found");
            }
        }
    })
}
