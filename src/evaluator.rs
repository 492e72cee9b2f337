//! Predicate evaluation over category snapshots
//!
//! Applies a canonical [`FilterSpecification`] to a read-only snapshot and
//! returns the identifiers of the categories that survive, in stable panel
//! order. Evaluation is deterministic and side-effect free; everything is
//! driven by the snapshot passed in.
//!
//! Per-category evaluation order:
//! 1. `predefined_only` gate
//! 2. tag match against the category's effective tag set (category tags,
//!    plus tags inherited from its items when enabled)
//! 3. per-item filters (`favorites_only`, `item_types`, date range,
//!    `search_text`) produce the filtered item subset; `hide_empty` drops
//!    categories whose subset is empty
//! 4. `min_items`/`max_items` bound the filtered subset size, not the raw
//!    item count
//! 5. `search_text` must match the category name or at least one surviving
//!    item's label/content
//!
//! Results keep the snapshot's relative order (stable sort by `order_index`),
//! never a relevance order.

use crate::model::{Category, CategoryId, Item};
use crate::spec::{FilterSpecification, TagMatchMode};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

/// Errors raised while evaluating a specification against a snapshot
///
/// These indicate a malformed snapshot, not a malformed request. The engine
/// leaves its cache and counters untouched when one is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluateError {
    /// Two categories in the snapshot share an identifier
    #[error("Duplicate category identifier in snapshot: {0}")]
    DuplicateCategoryId(CategoryId),
}

/// Evaluate a specification against a snapshot, returning surviving ids
///
/// `inherit_item_tags` extends each category's tag set with its items' tags
/// for the tag-match step.
///
/// # Errors
///
/// Returns `EvaluateError` if the snapshot contains duplicate category
/// identifiers.
pub fn evaluate(
    spec: &FilterSpecification,
    categories: &[Category],
    inherit_item_tags: bool,
) -> Result<Vec<CategoryId>, EvaluateError> {
    let mut seen = HashSet::with_capacity(categories.len());
    for category in categories {
        if !seen.insert(&category.id) {
            return Err(EvaluateError::DuplicateCategoryId(category.id.clone()));
        }
    }

    let mut ordered: Vec<&Category> = categories.iter().collect();
    ordered.sort_by_key(|c| c.order_index);

    let needle = spec.search_text.as_deref().map(str::to_lowercase);

    Ok(ordered
        .into_iter()
        .filter(|category| matches(spec, category, needle.as_deref(), inherit_item_tags))
        .map(|category| category.id.clone())
        .collect())
}

fn matches(
    spec: &FilterSpecification,
    category: &Category,
    needle: Option<&str>,
    inherit_item_tags: bool,
) -> bool {
    if spec.predefined_only && !category.is_predefined {
        return false;
    }

    if !spec.tags.is_empty() && !tags_match(spec, category, inherit_item_tags) {
        return false;
    }

    let surviving = category
        .items
        .iter()
        .filter(|item| item_passes(spec, item, needle))
        .count();

    if spec.hide_empty && surviving == 0 {
        return false;
    }

    if let Some(min) = spec.min_items {
        if surviving < min as usize {
            return false;
        }
    }
    if let Some(max) = spec.max_items {
        if surviving > max as usize {
            return false;
        }
    }

    if let Some(needle) = needle {
        let name_matches = category.name.to_lowercase().contains(needle);
        if !name_matches && surviving == 0 {
            return false;
        }
    }

    true
}

fn tags_match(spec: &FilterSpecification, category: &Category, inherit_item_tags: bool) -> bool {
    let mut effective: BTreeSet<String> =
        category.tags.iter().map(|t| t.to_lowercase()).collect();

    if inherit_item_tags {
        for item in &category.items {
            effective.extend(item.tags.iter().map(|t| t.to_lowercase()));
        }
    }

    match spec.tag_match_mode {
        TagMatchMode::Or => spec.tags.iter().any(|tag| effective.contains(tag)),
        TagMatchMode::And => spec.tags.iter().all(|tag| effective.contains(tag)),
    }
}

fn item_passes(spec: &FilterSpecification, item: &Item, needle: Option<&str>) -> bool {
    if spec.favorites_only && !item.is_favorite {
        return false;
    }

    if !spec.item_types.is_empty() && !spec.item_types.contains(&item.kind) {
        return false;
    }

    if let Some(from) = spec.date_from {
        if item.created < from {
            return false;
        }
    }
    if let Some(to) = spec.date_to {
        if item.created > to {
            return false;
        }
    }

    if let Some(needle) = needle {
        let label_hit = item.label.to_lowercase().contains(needle);
        let content_hit = item.content.to_lowercase().contains(needle);
        if !label_hit && !content_hit {
            return false;
        }
    }

    true
}
