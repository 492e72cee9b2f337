//! Canonicalization of raw filter requests
//!
//! The UI controller hands the engine a loosely-typed key/value request (a
//! `serde_json` object). This module validates and normalizes it into a
//! [`FilterSpecification`] exactly once; everything downstream operates only
//! on the canonical form.
//!
//! Only the recognized keys are meaningful; unknown keys are ignored so newer
//! frontends can send fields an older engine does not know about. A
//! recognized key with a value of the wrong type is an error, never silently
//! dropped.

use super::error::FilterSpecError;
use super::types::{FilterSpecification, TagMatchMode};
use crate::model::ItemKind;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// The untyped boundary form of a filter request
pub type FilterRequest = Map<String, Value>;

/// Validate and normalize a raw request into a canonical specification
///
/// Normalization rules:
/// - tag collections become lowercased, de-duplicated, sorted sets
/// - `tag_match_mode` defaults to OR when omitted
/// - blank `search_text` is treated as absent
/// - dates are RFC 3339 strings, converted to UTC
///
/// # Errors
///
/// Returns `FilterSpecError` if a recognized field holds a value of the
/// wrong type, a date cannot be parsed, an item type or match mode is not in
/// its closed set, or the bounds are inverted.
pub fn canonicalize(request: &FilterRequest) -> Result<FilterSpecification, FilterSpecError> {
    let spec = FilterSpecification {
        tags: string_set(request, "tags")?
            .map(|tags| {
                tags.iter()
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
        tag_match_mode: match_mode(request)?,
        favorites_only: boolean(request, "favorites_only")?.unwrap_or(false),
        item_types: item_types(request)?,
        min_items: count(request, "min_items")?,
        max_items: count(request, "max_items")?,
        search_text: string(request, "search_text")?
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        date_from: date(request, "date_from")?,
        date_to: date(request, "date_to")?,
        predefined_only: boolean(request, "predefined_only")?.unwrap_or(false),
        hide_empty: boolean(request, "hide_empty")?.unwrap_or(false),
    };

    spec.validate()?;
    Ok(spec)
}

/// JSON type name for error messages
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn boolean(request: &FilterRequest, field: &'static str) -> Result<Option<bool>, FilterSpecError> {
    match request.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(FilterSpecError::InvalidType {
            field,
            expected: "a boolean",
            found: type_name(other),
        }),
    }
}

fn string<'a>(
    request: &'a FilterRequest,
    field: &'static str,
) -> Result<Option<&'a str>, FilterSpecError> {
    match request.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(FilterSpecError::InvalidType {
            field,
            expected: "a string",
            found: type_name(other),
        }),
    }
}

fn string_set(
    request: &FilterRequest,
    field: &'static str,
) -> Result<Option<Vec<String>>, FilterSpecError> {
    match request.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(values)) => {
            let mut out = Vec::with_capacity(values.len());
            for value in values {
                match value {
                    Value::String(s) => out.push(s.clone()),
                    other => {
                        return Err(FilterSpecError::InvalidType {
                            field,
                            expected: "an array of strings",
                            found: type_name(other),
                        });
                    }
                }
            }
            Ok(Some(out))
        }
        Some(other) => Err(FilterSpecError::InvalidType {
            field,
            expected: "an array of strings",
            found: type_name(other),
        }),
    }
}

fn count(request: &FilterRequest, field: &'static str) -> Result<Option<u32>, FilterSpecError> {
    match request.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            let value = n
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| FilterSpecError::InvalidValue(field, n.to_string()))?;
            Ok(Some(value))
        }
        Some(other) => Err(FilterSpecError::InvalidType {
            field,
            expected: "a non-negative integer",
            found: type_name(other),
        }),
    }
}

fn date(
    request: &FilterRequest,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, FilterSpecError> {
    match string(request, field)? {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| FilterSpecError::InvalidDate(field, raw.to_string())),
    }
}

fn match_mode(request: &FilterRequest) -> Result<TagMatchMode, FilterSpecError> {
    match string(request, "tag_match_mode")? {
        None => Ok(TagMatchMode::default()),
        Some(raw) => match raw.to_ascii_uppercase().as_str() {
            "AND" => Ok(TagMatchMode::And),
            "OR" => Ok(TagMatchMode::Or),
            _ => Err(FilterSpecError::InvalidValue(
                "tag_match_mode",
                raw.to_string(),
            )),
        },
    }
}

fn item_types(request: &FilterRequest) -> Result<BTreeSet<ItemKind>, FilterSpecError> {
    let Some(raw) = string_set(request, "item_types")? else {
        return Ok(BTreeSet::new());
    };

    let mut kinds = BTreeSet::new();
    for name in raw {
        let kind: ItemKind = name
            .parse()
            .map_err(|_| FilterSpecError::InvalidValue("item_types", name.clone()))?;
        kinds.insert(kind);
    }
    Ok(kinds)
}
