//! Error types for filter specification handling
//!
//! Raised when a raw filter request cannot be canonicalized: a field holds a
//! value of the wrong type, a value is outside its domain, or the request is
//! internally inconsistent. These are caller errors; the engine never caches
//! or retries them.

use thiserror::Error;

/// Errors raised while canonicalizing or validating a filter request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterSpecError {
    /// A recognized field holds a JSON value of the wrong type
    #[error("Field '{field}' expects {expected}, got {found}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A field value is the right type but outside its domain
    #[error("Invalid value for field '{0}': {1}")]
    InvalidValue(&'static str, String),

    /// A date field could not be parsed as RFC 3339
    #[error("Invalid date in field '{0}': {1}")]
    InvalidDate(&'static str, String),

    /// `min_items` exceeds `max_items`
    #[error("min_items ({0}) exceeds max_items ({1})")]
    ItemBoundsInverted(u32, u32),

    /// `date_from` is later than `date_to`
    #[error("date_from is later than date_to")]
    DateRangeInverted,
}
