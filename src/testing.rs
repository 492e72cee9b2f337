//! Testing utilities for catsift
//!
//! Fixture builders for snapshots and raw requests, shared by the unit tests
//! across modules.
//!
//! Only available when compiled with `cfg(test)`.

use crate::model::{Category, CategoryId, Item, ItemId, ItemKind};
use crate::spec::FilterRequest;
use chrono::{TimeZone, Utc};

/// Build a category with a fixed creation timestamp
///
/// Tags are taken as written; the engine is responsible for case handling.
pub fn category(
    id: &str,
    name: &str,
    order_index: u32,
    tags: &[&str],
    items: Vec<Item>,
) -> Category {
    Category {
        id: CategoryId::from(id),
        name: name.to_string(),
        items,
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
        is_predefined: false,
        is_active: true,
        order_index,
        created: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// Build an item with a fixed creation timestamp and no tags
pub fn item(id: &str, kind: ItemKind, label: &str, content: &str) -> Item {
    Item {
        id: ItemId::new(id),
        kind,
        label: label.to_string(),
        content: content.to_string(),
        is_favorite: false,
        tags: Default::default(),
        usage_count: 0,
        created: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// Turn a `serde_json::json!` object literal into a `FilterRequest`
///
/// # Panics
///
/// Panics if `value` is not a JSON object.
pub fn request(value: serde_json::Value) -> FilterRequest {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("test request must be a JSON object, got {other}"),
    }
}
