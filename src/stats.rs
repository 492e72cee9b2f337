//! Filter and cache statistics
//!
//! `FilterStats` describes the most recent `apply_filters` call and is
//! recomputed every call. `CacheStats` carries the cumulative hit/miss
//! counters; `hit_rate` is always derived from them at read time, never
//! stored, so the two can not drift apart.

use serde::Serialize;

/// Per-call filter statistics, recomputed on every `apply_filters`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FilterStats {
    /// Snapshot size at call time
    pub total_categories: usize,
    /// Result size
    pub filtered_categories: usize,
    /// Number of constraining fields in the canonical specification
    pub active_filters_count: usize,
    /// Wall-clock duration of the call, in milliseconds
    pub execution_time_ms: f64,
}

/// Cumulative cache statistics since construction or the last stats reset
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheStats {
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// hits / (hits + misses); 0 before any call
    pub hit_rate: f64,
    pub cache_size: usize,
    pub cache_max_size: usize,
}

/// Accumulates hit/miss counts and remembers the last call's filter stats
#[derive(Debug, Default)]
pub struct StatsTracker {
    hits: u64,
    misses: u64,
    last_call: Option<FilterStats>,
}

impl StatsTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cache hit together with the call's filter stats
    pub fn record_hit(&mut self, call: FilterStats) {
        self.hits += 1;
        self.last_call = Some(call);
    }

    /// Record a cache miss together with the call's filter stats
    pub fn record_miss(&mut self, call: FilterStats) {
        self.misses += 1;
        self.last_call = Some(call);
    }

    /// Stats of the most recent call; zeroed before any call
    #[must_use]
    pub fn filter_stats(&self) -> FilterStats {
        self.last_call.unwrap_or_default()
    }

    /// Cumulative counters combined with the cache's current occupancy
    #[must_use]
    pub fn cache_stats(&self, cache_size: usize, cache_max_size: usize) -> CacheStats {
        let total = self.hits + self.misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        };

        CacheStats {
            cache_hits: self.hits,
            cache_misses: self.misses,
            hit_rate,
            cache_size,
            cache_max_size,
        }
    }

    /// Zero the cumulative counters and forget the last call
    pub fn reset(&mut self) {
        self.hits = 0;
        self.misses = 0;
        self.last_call = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(filtered: usize) -> FilterStats {
        FilterStats {
            total_categories: 10,
            filtered_categories: filtered,
            active_filters_count: 1,
            execution_time_ms: 0.2,
        }
    }

    #[test]
    fn test_hit_rate_zero_before_any_call() {
        let tracker = StatsTracker::new();
        let stats = tracker.cache_stats(0, 8);
        assert_eq!(stats.cache_hits, 0);
        assert_eq!(stats.cache_misses, 0);
        assert_eq!(stats.hit_rate, 0.0);
        assert_eq!(stats.cache_max_size, 8);
    }

    #[test]
    fn test_hit_rate_is_derived() {
        let mut tracker = StatsTracker::new();
        tracker.record_miss(call(3));
        tracker.record_hit(call(3));
        tracker.record_hit(call(3));

        let stats = tracker.cache_stats(1, 8);
        assert_eq!(stats.cache_hits, 2);
        assert_eq!(stats.cache_misses, 1);
        assert!((stats.hit_rate - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_filter_stats_reflect_last_call_only() {
        let mut tracker = StatsTracker::new();
        assert_eq!(tracker.filter_stats(), FilterStats::default());

        tracker.record_miss(call(7));
        tracker.record_hit(call(2));
        assert_eq!(tracker.filter_stats().filtered_categories, 2);
    }

    #[test]
    fn test_reset_zeroes_counters() {
        let mut tracker = StatsTracker::new();
        tracker.record_miss(call(1));
        tracker.record_hit(call(1));
        tracker.reset();

        let stats = tracker.cache_stats(0, 8);
        assert_eq!(stats.cache_hits, 0);
        assert_eq!(stats.cache_misses, 0);
        assert_eq!(stats.hit_rate, 0.0);
        assert_eq!(tracker.filter_stats(), FilterStats::default());
    }
}
