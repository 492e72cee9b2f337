//! Preset data structures
//!
//! A `Preset` is a named, persisted `FilterSpecification` with usage
//! metadata. `PresetStore` is the root container serialized to TOML.

use crate::spec::FilterSpecification;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named filter specification with usage metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Unique preset name
    pub name: String,

    /// Human-readable description (optional)
    #[serde(default)]
    pub description: String,

    /// When the preset was created
    pub created: DateTime<Utc>,

    /// When the preset was last applied
    pub last_used: DateTime<Utc>,

    /// Number of times the preset has been applied
    #[serde(default)]
    pub use_count: u32,

    /// The canonical specification this preset applies
    pub spec: FilterSpecification,
}

impl Preset {
    /// Create a new preset with current timestamps
    #[must_use]
    pub fn new(name: String, description: String, spec: FilterSpecification) -> Self {
        let now = Utc::now();
        Self {
            name,
            description,
            created: now,
            last_used: now,
            use_count: 0,
            spec,
        }
    }

    /// Record that this preset was applied
    pub fn record_use(&mut self) {
        self.use_count += 1;
        self.last_used = Utc::now();
    }
}

/// Root container for all presets, serialized to TOML
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PresetStore {
    #[serde(rename = "preset", default)]
    pub presets: Vec<Preset>,
}

impl PresetStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            presets: Vec::new(),
        }
    }

    /// Get a preset by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Get a mutable preset by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Preset> {
        self.presets.iter_mut().find(|p| p.name == name)
    }

    /// Check if a preset exists
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.presets.iter().any(|p| p.name == name)
    }

    /// Remove a preset by name
    pub fn remove(&mut self, name: &str) -> Option<Preset> {
        self.presets
            .iter()
            .position(|p| p.name == name)
            .map(|pos| self.presets.remove(pos))
    }

    /// Presets sorted by use count, most used first
    #[must_use]
    pub fn most_used(&self) -> Vec<&Preset> {
        let mut sorted: Vec<&Preset> = self.presets.iter().collect();
        sorted.sort_by(|a, b| b.use_count.cmp(&a.use_count));
        sorted
    }
}

/// Validate a preset name: 1-64 characters, alphanumeric plus `-` and `_`
///
/// # Errors
///
/// Returns a message describing the violation.
pub fn validate_preset_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Preset name cannot be empty".to_string());
    }

    if name.len() > 64 {
        return Err(format!("Preset name too long (max 64 chars): {}", name.len()));
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(format!(
            "Preset name '{name}' contains invalid characters (only alphanumeric, '-', and '_' allowed)"
        ));
    }

    Ok(())
}
