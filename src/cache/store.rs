//! Cache Store Module
//!
//! Synchronous cache engine: HashMap storage, insertion-order tracking,
//! lazy TTL expiry and statistics. Timer-driven expiry lives one level up in
//! [`BoundedTtlCache`](crate::cache::BoundedTtlCache).

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats, CacheStatsSnapshot, InsertionOrder};

// == Lookup ==
/// Outcome of a read against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<V> {
    /// Live value
    Hit(V),
    /// Key was never present (or already removed)
    Miss,
    /// Key was present but past its expiry; it has been removed
    Expired,
}

impl<V> Lookup<V> {
    pub fn into_option(self) -> Option<V> {
        match self {
            Lookup::Hit(value) => Some(value),
            Lookup::Miss | Lookup::Expired => None,
        }
    }
}

// == Cache Store ==
/// Bounded store with FIFO eviction and per-entry TTL.
#[derive(Debug)]
pub struct CacheStore<V> {
    entries: HashMap<String, CacheEntry<V>>,
    order: InsertionOrder,
    stats: CacheStats,
    /// Maximum number of entries allowed, always at least 1
    max_size: usize,
    /// TTL used when the caller does not supply one
    default_ttl: Duration,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates a new store. A `max_size` of zero is treated as one.
    pub fn new(max_size: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            max_size: max_size.max(1),
            default_ttl,
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl`.
    ///
    /// When the store is full and `key` is new, exactly one entry (the
    /// earliest inserted) is evicted first and its key is returned.
    /// Overwriting an existing key never evicts.
    pub fn set(&mut self, key: String, value: V, ttl: Duration) -> Option<String> {
        let entry = CacheEntry::new(value, ttl);
        let mut evicted = None;

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_size {
            if let Some(oldest) = self.order.pop_oldest() {
                self.entries.remove(&oldest);
                self.stats.record_eviction();
                evicted = Some(oldest);
            }
        }

        self.entries.insert(key.clone(), entry);
        self.order.insert(&key);
        self.stats.record_set();

        evicted
    }

    // == Get ==
    /// Looks `key` up, removing it if it has expired.
    ///
    /// Counts a hit for live values and a miss otherwise.
    pub fn get(&mut self, key: &str) -> Lookup<V>
    where
        V: Clone,
    {
        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                return Lookup::Miss;
            }
            Some(entry) => entry.is_expired(),
        };

        if expired {
            self.remove(key);
            self.stats.record_miss();
            return Lookup::Expired;
        }

        self.stats.record_hit();
        match self.entries.get(key) {
            Some(entry) => Lookup::Hit(entry.value.clone()),
            None => Lookup::Miss,
        }
    }

    /// Returns whether `key` holds a live value. No statistics are recorded.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Remove ==
    /// Removes `key` if present. Statistics are not touched.
    pub fn remove(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
            true
        } else {
            false
        }
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    // == Remove Expired ==
    /// Removes every entry whose expiry has passed and returns their keys.
    pub fn remove_expired(&mut self) -> Vec<String> {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove(key);
        }

        expired_keys
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStatsSnapshot {
        self.stats.snapshot(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
