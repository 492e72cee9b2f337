//! Category and item snapshot types
//!
//! These are the read-only records the engine filters. They are owned by the
//! storage layer of the surrounding application; the engine receives them as
//! an immutable snapshot and never mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Identifier of a category, assigned by the storage layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identifier of a single item within a category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// The closed set of item kinds the panel manager stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    Text,
    Code,
    Url,
    Path,
    WebStatic,
}

impl ItemKind {
    /// Canonical wire name, matching the storage layer's encoding
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Code => "CODE",
            Self::Url => "URL",
            Self::Path => "PATH",
            Self::WebStatic => "WEB_STATIC",
        }
    }
}

impl FromStr for ItemKind {
    type Err = UnknownItemKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TEXT" => Ok(Self::Text),
            "CODE" => Ok(Self::Code),
            "URL" => Ok(Self::Url),
            "PATH" => Ok(Self::Path),
            "WEB_STATIC" => Ok(Self::WebStatic),
            _ => Err(UnknownItemKind(s.to_string())),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an item kind string is not one of the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown item type: {0}")]
pub struct UnknownItemKind(pub String);

/// A single stored entry (snippet, link, path, ...) belonging to one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    /// Short display label shown in the panel
    pub label: String,
    /// Stored payload (snippet text, URL, filesystem path, ...)
    pub content: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub usage_count: u32,
    pub created: DateTime<Utc>,
}

/// A named, ordered grouping of items, optionally tagged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub is_predefined: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Position within the panel; snapshots are expected to be ordered by it
    #[serde(default)]
    pub order_index: u32,
    pub created: DateTime<Utc>,
}

const fn default_active() -> bool {
    true
}

impl Category {
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_kind_round_trip() {
        for kind in [
            ItemKind::Text,
            ItemKind::Code,
            ItemKind::Url,
            ItemKind::Path,
            ItemKind::WebStatic,
        ] {
            assert_eq!(kind.as_str().parse::<ItemKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_item_kind_case_insensitive() {
        assert_eq!("text".parse::<ItemKind>().unwrap(), ItemKind::Text);
        assert_eq!("web_static".parse::<ItemKind>().unwrap(), ItemKind::WebStatic);
    }

    #[test]
    fn test_item_kind_unknown() {
        let err = "IMAGE".parse::<ItemKind>();
        assert!(matches!(err, Err(UnknownItemKind(s)) if s == "IMAGE"));
    }

    #[test]
    fn test_item_kind_serde_wire_names() {
        let json = serde_json::to_string(&ItemKind::WebStatic).unwrap();
        assert_eq!(json, "\"WEB_STATIC\"");
    }
}
