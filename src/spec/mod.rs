//! Filter specification handling
//!
//! This module owns the boundary between the loosely-typed filter requests
//! the UI sends and the canonical, validated [`FilterSpecification`] the rest
//! of the engine operates on.
//!
//! # Examples
//!
//! ```
//! use catsift::spec::{canonicalize, FilterRequest, TagMatchMode};
//! use serde_json::json;
//!
//! let request: FilterRequest = json!({
//!     "tags": ["Git", "cli"],
//!     "hide_empty": true,
//! })
//! .as_object()
//! .unwrap()
//! .clone();
//!
//! let spec = canonicalize(&request).unwrap();
//! assert!(spec.tags.contains("git"));
//! assert_eq!(spec.tag_match_mode, TagMatchMode::Or);
//! ```

pub mod canonical;
pub mod error;
pub mod types;

pub use canonical::{FilterRequest, canonicalize};
pub use error::FilterSpecError;
pub use types::{FilterSpecification, FilterSpecificationBuilder, TagMatchMode};
