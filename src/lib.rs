//! Catsift - category filtering with fingerprint-keyed result caching
//!
//! This library is the filter engine behind the panel manager: it evaluates
//! declarative filter requests against a read-only category/item snapshot and
//! caches results under a canonical fingerprint of each request, tracking
//! hit/miss statistics and execution time along the way.
//!
//! The engine neither renders nor persists anything (presets aside); storage
//! hands it a snapshot, the UI controller drives it, and the owner clears the
//! cache whenever the underlying data changes.
//!
//! # Examples
//!
//! ```
//! use catsift::engine::FilterEngine;
//! use serde_json::json;
//! use std::num::NonZeroUsize;
//!
//! let mut engine = FilterEngine::new(NonZeroUsize::new(32).unwrap());
//! let request = json!({ "tags": ["git"], "hide_empty": true })
//!     .as_object()
//!     .unwrap()
//!     .clone();
//!
//! let snapshot = Vec::new();
//! let results = engine.apply_filters(&request, &snapshot).unwrap();
//! assert!(results.is_empty());
//! assert_eq!(engine.get_cache_stats().cache_misses, 1);
//! ```

use thiserror::Error;

pub mod cache;
pub mod engine;
pub mod evaluator;
pub mod fingerprint;
pub mod model;
pub mod presets;
pub mod spec;
pub mod stats;

#[cfg(test)]
pub mod testing;

pub use engine::{EngineConfig, FilterEngine};
pub use model::{Category, CategoryId, Item, ItemId, ItemKind};
pub use spec::{FilterRequest, FilterSpecification, TagMatchMode};
pub use stats::{CacheStats, FilterStats};

/// Error enum, contains all failure states of the engine
#[derive(Debug, Error)]
pub enum CatsiftError {
    /// Malformed or inconsistent filter request
    #[error("Filter specification error: {0}")]
    Spec(#[from] spec::FilterSpecError),
    /// Malformed snapshot encountered during evaluation
    #[error("Evaluation error: {0}")]
    Evaluate(#[from] evaluator::EvaluateError),
    /// Preset storage error
    #[error("Preset error: {0}")]
    Preset(#[from] presets::PresetError),
}
