//! The filter engine orchestrator
//!
//! Wires the canonicalizer, fingerprint generator, evaluator, result cache,
//! and stats tracker into the `apply_filters` call the UI controller drives.
//!
//! The engine is a single owned instance, constructed explicitly and passed
//! around by its owner; there is no ambient singleton. Calls are synchronous
//! and single-threaded (`&mut self` enforces exclusive use), so no internal
//! locking is needed. A caller that wants to share the engine across threads
//! wraps the whole instance in one mutex, which preserves the no-partial-
//! state-on-error guarantee.
//!
//! The engine has no change-notification mechanism of its own: the owner
//! must call [`FilterEngine::clear_cache`] whenever the underlying categories
//! or items change.

use crate::CatsiftError;
use crate::cache::{CacheEntry, ResultCache};
use crate::evaluator::evaluate;
use crate::fingerprint::Fingerprint;
use crate::model::{Category, CategoryId};
use crate::spec::{FilterRequest, FilterSpecification, canonicalize};
use crate::stats::{CacheStats, FilterStats, StatsTracker};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::time::Instant;

/// Engine tuning knobs
///
/// Deserializable with defaults so the embedding application can carry this
/// struct inside its own TOML configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of cached filter results
    #[serde(default = "default_max_cache_size")]
    pub max_cache_size: NonZeroUsize,

    /// Extend each category's tag set with its items' tags during tag
    /// matching
    #[serde(default = "default_true")]
    pub inherit_item_tags: bool,

    /// Also zero the cumulative hit/miss counters on `clear_cache`, making
    /// stats read "since the last data change" instead of "since startup"
    #[serde(default)]
    pub reset_stats_on_clear: bool,
}

fn default_max_cache_size() -> NonZeroUsize {
    NonZeroUsize::new(64).expect("64 is non-zero")
}

const fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_cache_size: default_max_cache_size(),
            inherit_item_tags: true,
            reset_stats_on_clear: false,
        }
    }
}

/// Category filter engine with fingerprint-keyed result caching
pub struct FilterEngine {
    config: EngineConfig,
    cache: ResultCache,
    stats: StatsTracker,
}

impl FilterEngine {
    /// Create an engine with the given cache bound and default behavior
    #[must_use]
    pub fn new(max_cache_size: NonZeroUsize) -> Self {
        Self::with_config(EngineConfig {
            max_cache_size,
            ..EngineConfig::default()
        })
    }

    /// Create an engine from a full configuration
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            cache: ResultCache::new(config.max_cache_size),
            stats: StatsTracker::new(),
        }
    }

    /// Apply a raw filter request to a snapshot
    ///
    /// Canonicalizes the request, looks the fingerprint up in the cache, and
    /// either replays the cached result or evaluates the snapshot and caches
    /// the outcome. An empty request never fails and returns the snapshot
    /// unfiltered.
    ///
    /// # Errors
    ///
    /// Returns `CatsiftError::Spec` for a malformed request and
    /// `CatsiftError::Evaluate` for a malformed snapshot. In both cases the
    /// cache and the hit/miss counters are exactly as they were before the
    /// call.
    pub fn apply_filters(
        &mut self,
        request: &FilterRequest,
        snapshot: &[Category],
    ) -> Result<Vec<Category>, CatsiftError> {
        let spec = canonicalize(request)?;
        self.apply_spec(&spec, snapshot)
    }

    /// Apply an already-canonical specification to a snapshot
    ///
    /// Used by callers that hold a stored specification (presets) and do not
    /// go through the raw-request boundary.
    ///
    /// # Errors
    ///
    /// Returns `CatsiftError::Spec` if the specification violates its
    /// cross-field invariants and `CatsiftError::Evaluate` for a malformed
    /// snapshot.
    pub fn apply_spec(
        &mut self,
        spec: &FilterSpecification,
        snapshot: &[Category],
    ) -> Result<Vec<Category>, CatsiftError> {
        let started = Instant::now();
        spec.validate()?;

        let key = Fingerprint::of(spec);

        if let Some(entry) = self.cache.get(&key) {
            let ids = entry.category_ids.clone();
            let resolved = resolve(&ids, snapshot);
            tracing::debug!(fingerprint = %key, results = resolved.len(), "cache hit");

            self.stats.record_hit(FilterStats {
                total_categories: snapshot.len(),
                filtered_categories: resolved.len(),
                active_filters_count: spec.active_filters_count(),
                execution_time_ms: elapsed_ms(started),
            });
            return Ok(resolved);
        }

        // Evaluate before touching cache or counters so a malformed snapshot
        // leaves the engine state untouched
        let ids = evaluate(spec, snapshot, self.config.inherit_item_tags)?;
        self.cache.put(key, CacheEntry::new(ids.clone()));
        let resolved = resolve(&ids, snapshot);
        tracing::debug!(fingerprint = %key, results = resolved.len(), "cache miss");

        self.stats.record_miss(FilterStats {
            total_categories: snapshot.len(),
            filtered_categories: resolved.len(),
            active_filters_count: spec.active_filters_count(),
            execution_time_ms: elapsed_ms(started),
        });
        Ok(resolved)
    }

    /// Stats of the most recent `apply_filters` call; zeroed before any call
    #[must_use]
    pub fn get_filter_stats(&self) -> FilterStats {
        self.stats.filter_stats()
    }

    /// Cumulative cache statistics
    #[must_use]
    pub fn get_cache_stats(&self) -> CacheStats {
        self.stats.cache_stats(self.cache.len(), self.cache.max_size())
    }

    /// Drop all cached results
    ///
    /// The owner calls this whenever the underlying categories or items
    /// change. Counters survive unless `reset_stats_on_clear` is set.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        if self.config.reset_stats_on_clear {
            self.stats.reset();
        }
        tracing::debug!(
            reset_stats = self.config.reset_stats_on_clear,
            "result cache cleared"
        );
    }

    /// Zero the cumulative hit/miss counters without touching the cache
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// The configuration this engine was built with
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Re-resolve cached identifiers against the live snapshot
///
/// Identifiers that no longer resolve (the category was deleted after the
/// entry was cached but before the owner cleared the cache) are dropped.
fn resolve(ids: &[CategoryId], snapshot: &[Category]) -> Vec<Category> {
    let by_id: HashMap<&CategoryId, &Category> =
        snapshot.iter().map(|c| (&c.id, c)).collect();

    let mut resolved = Vec::with_capacity(ids.len());
    for id in ids {
        match by_id.get(id) {
            Some(category) => resolved.push((*category).clone()),
            None => tracing::warn!(%id, "cached category no longer in snapshot, dropping"),
        }
    }
    resolved
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
