//! Saved filter presets
//!
//! Lets the surrounding application persist named filter specifications with
//! usage metadata, stored as TOML. Presets persist specifications, never
//! cached results; a loaded preset goes through
//! [`crate::engine::FilterEngine::apply_spec`] like any other call.
//!
//! # Examples
//!
//! ```no_run
//! use catsift::presets::PresetManager;
//! use catsift::spec::FilterSpecification;
//! use std::path::PathBuf;
//!
//! let manager = PresetManager::new(PathBuf::from("presets.toml"));
//! let spec = FilterSpecification::builder()
//!     .tag("git")
//!     .hide_empty(true)
//!     .build()
//!     .unwrap();
//! manager.create("git-stuff", "Git snippets".to_string(), spec).unwrap();
//! ```

pub mod error;
pub mod store;
pub mod types;

pub use error::PresetError;
pub use store::PresetManager;
pub use types::{Preset, PresetStore, validate_preset_name};
