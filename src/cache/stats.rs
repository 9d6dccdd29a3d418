//! Cache Statistics Module
//!
//! Tracks cache performance metrics: hits, misses, sets and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Lifetime counters for a cache instance. Never reset automatically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads that returned a live value
    pub hits: u64,
    /// Reads that found nothing or an expired entry
    pub misses: u64,
    /// Successful insertions, including overwrites
    pub sets: u64,
    /// Live entries dropped to stay within capacity
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Hit rate as a percentage in `0.0..=100.0`, or 0.0 before any read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64 * 100.0
        }
    }

    /// Hit rate rendered as `"NN.NN%"`, or `"0%"` before any read.
    pub fn hit_rate_display(&self) -> String {
        if self.hits + self.misses == 0 {
            "0%".to_string()
        } else {
            format!("{:.2}%", self.hit_rate())
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_set(&mut self) {
        self.sets += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Snapshot ==
    /// Freezes the counters together with the live entry count.
    pub fn snapshot(&self, size: usize) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.hits,
            misses: self.misses,
            sets: self.sets,
            evictions: self.evictions,
            hit_rate: self.hit_rate_display(),
            size,
        }
    }
}

// == Stats Snapshot ==
/// Point-in-time view returned by `BoundedTtlCache::stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub evictions: u64,
    #[serde(rename = "hitRate")]
    pub hit_rate: String,
    pub size: usize,
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.sets, 0);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.hit_rate_display(), "0%");
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.hit_rate_display(), "100.00%");
    }

    #[test]
    fn test_hit_rate_all_misses() {
        let mut stats = CacheStats::new();
        stats.record_miss();
        stats.record_miss();
        assert_eq!(stats.hit_rate_display(), "0.00%");
    }

    #[test]
    fn test_hit_rate_rounds_to_two_decimals() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_miss();
        assert_eq!(stats.hit_rate_display(), "33.33%");

        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.hit_rate_display(), "60.00%");
    }

    #[test]
    fn test_record_set_and_eviction() {
        let mut stats = CacheStats::new();
        stats.record_set();
        stats.record_set();
        stats.record_eviction();
        assert_eq!(stats.sets, 2);
        assert_eq!(stats.evictions, 1);
    }

    #[test]
    fn test_snapshot_serializes_hit_rate_as_string() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();

        let json = serde_json::to_value(stats.snapshot(7)).unwrap();
        assert_eq!(json["hitRate"], "50.00%");
        assert_eq!(json["size"], 7);
        assert_eq!(json["hits"], 1);
    }
}
