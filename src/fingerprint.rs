//! Deterministic cache keys for canonical filter specifications
//!
//! A [`Fingerprint`] is a blake3 digest of a stable serialization of a
//! [`FilterSpecification`]. Two specifications that are semantically equal
//! (same field values, regardless of request key order, tag casing, or input
//! collection order) produce the same fingerprint, because the digest is
//! computed from the canonical form only: tag sets iterate in sorted order
//! and every field is written in the fixed order listed in [`Fingerprint::of`].
//!
//! A colliding digest would silently serve another specification's cached
//! result. With a 256-bit digest over the handful of distinct specifications
//! a panel session produces, that is accepted rather than guarded against at
//! runtime; the distinctness tests below cover the realistic neighborhood.

use crate::spec::{FilterSpecification, TagMatchMode};
use chrono::{DateTime, Utc};
use std::fmt;

/// A deterministic key derived from a canonical filter specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Compute the fingerprint of a canonical specification
    ///
    /// Field order is fixed: tags, tag_match_mode, favorites_only,
    /// item_types, min_items, max_items, search_text, date_from, date_to,
    /// predefined_only, hide_empty. Changing this order changes every key
    /// and invalidates any warm cache, which is safe but wasteful.
    #[must_use]
    pub fn of(spec: &FilterSpecification) -> Self {
        let mut hasher = blake3::Hasher::new();

        write_u64(&mut hasher, spec.tags.len() as u64);
        for tag in &spec.tags {
            write_str(&mut hasher, tag);
        }

        hasher.update(&[match spec.tag_match_mode {
            TagMatchMode::And => 0,
            TagMatchMode::Or => 1,
        }]);
        write_bool(&mut hasher, spec.favorites_only);

        write_u64(&mut hasher, spec.item_types.len() as u64);
        for kind in &spec.item_types {
            write_str(&mut hasher, kind.as_str());
        }

        write_opt_u32(&mut hasher, spec.min_items);
        write_opt_u32(&mut hasher, spec.max_items);

        match &spec.search_text {
            None => {
                hasher.update(&[0]);
            }
            Some(text) => {
                hasher.update(&[1]);
                write_str(&mut hasher, text);
            }
        }

        write_opt_date(&mut hasher, spec.date_from);
        write_opt_date(&mut hasher, spec.date_to);
        write_bool(&mut hasher, spec.predefined_only);
        write_bool(&mut hasher, spec.hide_empty);

        Self(*hasher.finalize().as_bytes())
    }

    /// Raw digest bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

fn write_u64(hasher: &mut blake3::Hasher, value: u64) {
    hasher.update(&value.to_le_bytes());
}

// Length-prefixed so adjacent strings cannot run together
fn write_str(hasher: &mut blake3::Hasher, value: &str) {
    write_u64(hasher, value.len() as u64);
    hasher.update(value.as_bytes());
}

fn write_bool(hasher: &mut blake3::Hasher, value: bool) {
    hasher.update(&[u8::from(value)]);
}

fn write_opt_u32(hasher: &mut blake3::Hasher, value: Option<u32>) {
    match value {
        None => {
            hasher.update(&[0]);
        }
        Some(v) => {
            hasher.update(&[1]);
            hasher.update(&v.to_le_bytes());
        }
    }
}

fn write_opt_date(hasher: &mut blake3::Hasher, value: Option<DateTime<Utc>>) {
    match value {
        None => {
            hasher.update(&[0]);
        }
        Some(dt) => {
            hasher.update(&[1]);
            hasher.update(&dt.timestamp_millis().to_le_bytes());
        }
    }
}
