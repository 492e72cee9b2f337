//! Canonical filter specification types
//!
//! This module defines the validated form of a filter request:
//! - `FilterSpecification`: the canonical, typed criteria all internal logic
//!   operates on
//! - `TagMatchMode`: AND/OR combination of requested tags
//! - `FilterSpecificationBuilder`: fluent construction for programmatic
//!   callers (presets, tests)
//!
//! Raw key/value requests are converted to this form exactly once, at the
//! boundary (see [`super::canonical`]); nothing downstream ever touches the
//! raw request again.

use super::error::FilterSpecError;
use crate::model::ItemKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tag matching mode (AND = all requested tags, OR = any requested tag)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TagMatchMode {
    /// Match ALL requested tags (AND logic)
    And,
    /// Match ANY requested tag (OR logic)
    #[default]
    Or,
}

/// The canonical, validated description of which categories should be included
///
/// All fields are optional in the sense that their default means "no
/// constraint". The all-default value is the no-op specification: it matches
/// every category and always produces the same fingerprint.
///
/// Invariants (enforced by [`FilterSpecification::validate`]):
/// - `min_items <= max_items` when both are present
/// - `date_from <= date_to` when both are present
/// - `tags` entries are lowercase and trimmed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpecification {
    /// Tags a category must carry, lowercased and de-duplicated
    #[serde(default)]
    pub tags: BTreeSet<String>,

    /// How multiple requested tags combine; OR unless asked otherwise
    #[serde(default)]
    pub tag_match_mode: TagMatchMode,

    /// Keep only favorite items when filtering item subsets
    #[serde(default)]
    pub favorites_only: bool,

    /// Keep only items of these kinds; empty = all kinds
    #[serde(default)]
    pub item_types: BTreeSet<ItemKind>,

    /// Lower bound on the filtered item subset size
    #[serde(default)]
    pub min_items: Option<u32>,

    /// Upper bound on the filtered item subset size
    #[serde(default)]
    pub max_items: Option<u32>,

    /// Case-insensitive text matched against category names and item
    /// labels/contents
    #[serde(default)]
    pub search_text: Option<String>,

    /// Keep only items created at or after this instant
    #[serde(default)]
    pub date_from: Option<DateTime<Utc>>,

    /// Keep only items created at or before this instant
    #[serde(default)]
    pub date_to: Option<DateTime<Utc>>,

    /// Keep only predefined categories
    #[serde(default)]
    pub predefined_only: bool,

    /// Drop categories whose filtered item subset is empty
    #[serde(default)]
    pub hide_empty: bool,
}

impl FilterSpecification {
    /// Create a new specification builder
    #[must_use]
    pub fn builder() -> FilterSpecificationBuilder {
        FilterSpecificationBuilder::default()
    }

    /// True when no field constrains the result (the no-op specification)
    #[must_use]
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }

    /// Number of fields that actively constrain the result
    ///
    /// `tag_match_mode` is a modifier on `tags`, not a filter of its own, so
    /// it is not counted.
    #[must_use]
    pub fn active_filters_count(&self) -> usize {
        let mut count = 0;
        count += usize::from(!self.tags.is_empty());
        count += usize::from(self.favorites_only);
        count += usize::from(!self.item_types.is_empty());
        count += usize::from(self.min_items.is_some());
        count += usize::from(self.max_items.is_some());
        count += usize::from(self.search_text.is_some());
        count += usize::from(self.date_from.is_some());
        count += usize::from(self.date_to.is_some());
        count += usize::from(self.predefined_only);
        count += usize::from(self.hide_empty);
        count
    }

    /// Check the cross-field invariants
    ///
    /// # Errors
    ///
    /// Returns `FilterSpecError` if `min_items > max_items` or
    /// `date_from > date_to`.
    pub fn validate(&self) -> Result<(), FilterSpecError> {
        if let (Some(min), Some(max)) = (self.min_items, self.max_items) {
            if min > max {
                return Err(FilterSpecError::ItemBoundsInverted(min, max));
            }
        }

        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(FilterSpecError::DateRangeInverted);
            }
        }

        Ok(())
    }
}

/// Builder for `FilterSpecification`
///
/// Normalizes tags the same way the request canonicalizer does, so a built
/// specification fingerprints identically to one parsed from a raw request.
#[derive(Debug, Clone, Default)]
pub struct FilterSpecificationBuilder {
    spec: FilterSpecification,
}

impl FilterSpecificationBuilder {
    /// Add a tag (lowercased and trimmed; empty strings are dropped)
    #[must_use]
    pub fn tag(mut self, tag: &str) -> Self {
        let normalized = tag.trim().to_lowercase();
        if !normalized.is_empty() {
            self.spec.tags.insert(normalized);
        }
        self
    }

    /// Add several tags at once
    #[must_use]
    pub fn tags<'a>(mut self, tags: impl IntoIterator<Item = &'a str>) -> Self {
        for tag in tags {
            self = self.tag(tag);
        }
        self
    }

    /// Set how multiple tags combine
    #[must_use]
    pub const fn tag_match_mode(mut self, mode: TagMatchMode) -> Self {
        self.spec.tag_match_mode = mode;
        self
    }

    /// Keep only favorite items
    #[must_use]
    pub const fn favorites_only(mut self, enabled: bool) -> Self {
        self.spec.favorites_only = enabled;
        self
    }

    /// Restrict items to a kind
    #[must_use]
    pub fn item_type(mut self, kind: ItemKind) -> Self {
        self.spec.item_types.insert(kind);
        self
    }

    /// Lower bound on the filtered item subset size
    #[must_use]
    pub const fn min_items(mut self, min: u32) -> Self {
        self.spec.min_items = Some(min);
        self
    }

    /// Upper bound on the filtered item subset size
    #[must_use]
    pub const fn max_items(mut self, max: u32) -> Self {
        self.spec.max_items = Some(max);
        self
    }

    /// Text to search for in category names and item labels/contents
    #[must_use]
    pub fn search_text(mut self, text: &str) -> Self {
        let trimmed = text.trim();
        self.spec.search_text = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Keep only items created at or after this instant
    #[must_use]
    pub const fn date_from(mut self, from: DateTime<Utc>) -> Self {
        self.spec.date_from = Some(from);
        self
    }

    /// Keep only items created at or before this instant
    #[must_use]
    pub const fn date_to(mut self, to: DateTime<Utc>) -> Self {
        self.spec.date_to = Some(to);
        self
    }

    /// Keep only predefined categories
    #[must_use]
    pub const fn predefined_only(mut self, enabled: bool) -> Self {
        self.spec.predefined_only = enabled;
        self
    }

    /// Drop categories whose filtered item subset is empty
    #[must_use]
    pub const fn hide_empty(mut self, enabled: bool) -> Self {
        self.spec.hide_empty = enabled;
        self
    }

    /// Build the specification, checking cross-field invariants
    ///
    /// # Errors
    ///
    /// Returns `FilterSpecError` if the bounds are inverted.
    pub fn build(self) -> Result<FilterSpecification, FilterSpecError> {
        self.spec.validate()?;
        Ok(self.spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_noop() {
        let spec = FilterSpecification::default();
        assert!(spec.is_noop());
        assert_eq!(spec.active_filters_count(), 0);
    }

    #[test]
    fn test_builder_normalizes_tags() {
        let spec = FilterSpecification::builder()
            .tags(["Git", "  CLI ", "git", ""])
            .build()
            .unwrap();

        let tags: Vec<&str> = spec.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["cli", "git"]);
        assert_eq!(spec.active_filters_count(), 1);
    }

    #[test]
    fn test_builder_rejects_inverted_item_bounds() {
        let result = FilterSpecification::builder()
            .min_items(5)
            .max_items(2)
            .build();
        assert!(matches!(result, Err(FilterSpecError::ItemBoundsInverted(5, 2))));
    }

    #[test]
    fn test_builder_rejects_inverted_date_range() {
        let from = "2026-02-01T00:00:00Z".parse().unwrap();
        let to = "2026-01-01T00:00:00Z".parse().unwrap();
        let result = FilterSpecification::builder()
            .date_from(from)
            .date_to(to)
            .build();
        assert!(matches!(result, Err(FilterSpecError::DateRangeInverted)));
    }

    #[test]
    fn test_active_filters_count_ignores_match_mode() {
        let spec = FilterSpecification::builder()
            .tag("git")
            .tag_match_mode(TagMatchMode::And)
            .hide_empty(true)
            .build()
            .unwrap();
        assert_eq!(spec.active_filters_count(), 2);
    }

    #[test]
    fn test_blank_search_text_is_absent() {
        let spec = FilterSpecification::builder()
            .search_text("   ")
            .build()
            .unwrap();
        assert!(spec.search_text.is_none());
        assert!(spec.is_noop());
    }
}
