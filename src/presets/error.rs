//! Error types for preset storage

use crate::spec::FilterSpecError;
use std::io;
use thiserror::Error;

/// Errors that can occur while managing saved filter presets
#[derive(Debug, Error)]
pub enum PresetError {
    /// Preset not found
    #[error("Preset '{0}' not found")]
    NotFound(String),

    /// Preset already exists
    #[error("Preset '{0}' already exists")]
    AlreadyExists(String),

    /// Invalid preset name
    #[error("Invalid preset name '{0}': {1}")]
    InvalidName(String, String),

    /// The stored specification violates its invariants
    #[error("Invalid preset specification: {0}")]
    InvalidSpec(#[from] FilterSpecError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for PresetError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for PresetError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
