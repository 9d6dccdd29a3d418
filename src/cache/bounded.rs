//! Bounded TTL Cache
//!
//! Thread-safe handle around [`CacheStore`] that adds timer-driven expiry.
//! Every operation takes one lock covering entries, insertion order, pending
//! timers and statistics.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, trace};

use crate::cache::{CacheStatsSnapshot, CacheStore, ExpiryTimers, Lookup};
use crate::cache::{DEFAULT_MAX_SIZE, DEFAULT_TTL};

#[derive(Debug)]
struct Shared<V> {
    store: CacheStore<V>,
    timers: ExpiryTimers,
}

impl<V> Shared<V> {
    fn remove(&mut self, key: &str) -> bool {
        self.timers.cancel(key);
        self.store.remove(key)
    }
}

// == Bounded TTL Cache ==
/// Size-bounded, TTL-bounded memoization cache.
///
/// Cloning yields another handle to the same cache. Each `set` schedules a
/// removal on the current tokio runtime; outside a runtime, expired entries
/// are still dropped lazily by [`get`](Self::get) and by [`cleanup`](Self::cleanup).
///
/// Eviction is first-in first-out by insertion; reads never reorder.
#[derive(Debug)]
pub struct BoundedTtlCache<V> {
    inner: Arc<Mutex<Shared<V>>>,
}

impl<V> Clone for BoundedTtlCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Send + 'static> Default for BoundedTtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE, DEFAULT_TTL)
    }
}

impl<V: Send + 'static> BoundedTtlCache<V> {
    // == Constructor ==
    /// Creates a cache holding at most `max_size` entries (minimum 1), with
    /// `default_ttl` applied when `set` is called without an explicit TTL.
    pub fn new(max_size: usize, default_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Shared {
                store: CacheStore::new(max_size, default_ttl),
                timers: ExpiryTimers::new(),
            })),
        }
    }

    // == Get ==
    /// Returns a clone of the live value for `key`.
    ///
    /// An expired entry is removed (timer included) and reported as a miss.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let mut shared = self.inner.lock();
        match shared.store.get(key) {
            Lookup::Hit(value) => {
                trace!(key, "cache hit");
                Some(value)
            }
            Lookup::Expired => {
                shared.timers.cancel(key);
                trace!(key, "cache miss (expired)");
                None
            }
            Lookup::Miss => {
                trace!(key, "cache miss");
                None
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key` for the default TTL.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let ttl = self.inner.lock().store.default_ttl();
        self.set_with_ttl(key, value, ttl);
    }

    /// Stores `value` under `key` for `ttl`.
    ///
    /// If the cache is full and `key` is new, the earliest-inserted entry is
    /// evicted first. Any pending expiry for `key` is replaced.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        let mut shared = self.inner.lock();

        if let Some(evicted) = shared.store.set(key.clone(), value, ttl) {
            shared.timers.cancel(&evicted);
            debug!(evicted = %evicted, "cache full, evicted oldest entry");
        }

        shared.timers.cancel(&key);
        self.schedule_expiry(&mut shared, key, ttl);
    }

    fn schedule_expiry(&self, shared: &mut Shared<V>, key: String, ttl: Duration) {
        let Ok(runtime) = Handle::try_current() else {
            trace!(key = %key, "no runtime, relying on lazy expiry");
            return;
        };

        let token = shared.timers.next_token();
        let weak = Arc::downgrade(&self.inner);
        let timer_key = key.clone();
        let handle = runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            expire(&weak, &timer_key, token);
        });

        shared.timers.register(key, token, handle);
    }

    // == Delete ==
    /// Removes `key` and its pending expiry. Returns whether an entry existed.
    pub fn delete(&self, key: &str) -> bool {
        self.inner.lock().remove(key)
    }

    // == Clear ==
    /// Drops every entry and pending expiry. Statistics are kept.
    pub fn clear(&self) {
        let mut shared = self.inner.lock();
        shared.timers.cancel_all();
        shared.store.clear();
    }

    // == Cleanup ==
    /// Sweeps out every expired entry, independently of the timers.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&self) -> usize {
        let mut shared = self.inner.lock();
        let expired = shared.store.remove_expired();
        for key in &expired {
            shared.timers.cancel(key);
        }
        expired.len()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStatsSnapshot {
        self.inner.lock().store.stats()
    }

    /// Whether `key` holds a live value. Does not count as a read.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.lock().store.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().store.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.inner.lock().store.max_size()
    }

    pub fn default_ttl(&self) -> Duration {
        self.inner.lock().store.default_ttl()
    }

    #[cfg(test)]
    fn pending_timers(&self) -> usize {
        self.inner.lock().timers.len()
    }
}

/// Timer body: remove `key` unless a newer `set` or a `delete` got there first.
fn expire<V>(cache: &Weak<Mutex<Shared<V>>>, key: &str, token: u64) {
    let Some(inner) = cache.upgrade() else {
        return;
    };
    let mut shared = inner.lock();
    if shared.timers.complete(key, token) && shared.store.remove(key) {
        debug!(key, "cache entry expired");
    }
}
