//! Bounded result cache with least-recently-used eviction
//!
//! Maps specification fingerprints to the category identifiers their
//! evaluation produced. Capacity is fixed at construction; inserting into a
//! full cache evicts the least-recently-used entry first. Both `get` hits and
//! `put`s refresh recency.
//!
//! Entries hold identifiers only, never full categories: a stale entry that
//! references a since-deleted category is resolved lazily by the engine
//! re-resolving identifiers against the live snapshot, so the cache never has
//! to track storage-layer changes itself.

use crate::fingerprint::Fingerprint;
use crate::model::CategoryId;
use chrono::{DateTime, Utc};
use lru::LruCache;
use std::num::NonZeroUsize;

/// One cached filter result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Surviving category identifiers, in panel order
    pub category_ids: Vec<CategoryId>,
    /// When this entry was computed
    pub created: DateTime<Utc>,
}

impl CacheEntry {
    #[must_use]
    pub fn new(category_ids: Vec<CategoryId>) -> Self {
        Self {
            category_ids,
            created: Utc::now(),
        }
    }
}

/// Fingerprint-keyed result cache with LRU eviction
#[derive(Debug)]
pub struct ResultCache {
    entries: LruCache<Fingerprint, CacheEntry>,
}

impl ResultCache {
    /// Create a cache holding at most `max_size` entries
    #[must_use]
    pub fn new(max_size: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(max_size),
        }
    }

    /// Look up an entry, refreshing its recency on a hit
    pub fn get(&mut self, key: &Fingerprint) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Insert an entry, evicting the least-recently-used one at capacity
    pub fn put(&mut self, key: Fingerprint, entry: CacheEntry) {
        if self.entries.put(key, entry).is_none() && self.entries.len() == self.entries.cap().get()
        {
            tracing::debug!(size = self.entries.len(), "result cache at capacity");
        }
    }

    /// Remove all entries; cumulative hit/miss counters live elsewhere and
    /// are not touched
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Current entry count
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured maximum entry count
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.entries.cap().get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::FilterSpecification;

    fn key(tag: &str) -> Fingerprint {
        let spec = FilterSpecification::builder().tag(tag).build().unwrap();
        Fingerprint::of(&spec)
    }

    fn entry(ids: &[&str]) -> CacheEntry {
        CacheEntry::new(ids.iter().map(|id| CategoryId::from(*id)).collect())
    }

    fn cache(cap: usize) -> ResultCache {
        ResultCache::new(NonZeroUsize::new(cap).unwrap())
    }

    #[test]
    fn test_put_then_get() {
        let mut cache = cache(4);
        cache.put(key("git"), entry(&["c1", "c2"]));

        let hit = cache.get(&key("git")).unwrap();
        assert_eq!(hit.category_ids, vec![CategoryId::from("c1"), CategoryId::from("c2")]);
        assert!(cache.get(&key("docs")).is_none());
    }

    #[test]
    fn test_lru_eviction_order() {
        let mut cache = cache(2);
        cache.put(key("f1"), entry(&["a"]));
        cache.put(key("f2"), entry(&["b"]));
        cache.put(key("f3"), entry(&["c"]));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&key("f1")).is_none());
        assert!(cache.get(&key("f2")).is_some());
        assert!(cache.get(&key("f3")).is_some());
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = cache(2);
        cache.put(key("f1"), entry(&["a"]));
        cache.put(key("f2"), entry(&["b"]));

        // Touch f1 so f2 becomes the eviction candidate
        assert!(cache.get(&key("f1")).is_some());
        cache.put(key("f3"), entry(&["c"]));

        assert!(cache.get(&key("f1")).is_some());
        assert!(cache.get(&key("f2")).is_none());
    }

    #[test]
    fn test_size_never_exceeds_capacity() {
        let mut cache = cache(2);
        for tag in ["a", "b", "c", "d", "e"] {
            cache.put(key(tag), entry(&["x"]));
            assert!(cache.len() <= 2);
        }
    }

    #[test]
    fn test_clear_empties_cache() {
        let mut cache = cache(2);
        cache.put(key("f1"), entry(&["a"]));
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert!(cache.get(&key("f1")).is_none());
        assert_eq!(cache.max_size(), 2);
    }

    #[test]
    fn test_put_same_key_replaces_entry() {
        let mut cache = cache(2);
        cache.put(key("f1"), entry(&["a"]));
        cache.put(key("f1"), entry(&["b"]));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key("f1")).unwrap().category_ids, vec![CategoryId::from("b")]);
    }
}
