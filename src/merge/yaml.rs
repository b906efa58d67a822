//! YAML overlay operations
//!
//! This module layers one YAML document on top of another and navigates
//! documents by path.
//!
//! ## Merge rule
//!
//! - Mapping on both sides: merge recursively, key by key
//! - Anything else: the overlay value replaces the base value wholly
//!   (sequences are replaced, never merged element-wise)
//! - Keys only present in the base are kept, keys only present in the overlay
//!   are added
//!
//! Inputs are never modified. Precedence is purely left-to-right: when folding
//! several documents, the last one wins every conflict.

use log::debug;
use serde_yaml::{Mapping, Value as YamlValue};

use super::{format_path, PathSegment};
use crate::error::{Error, Result};

/// Overlay `overlay` on top of `base` and return the merged document.
///
/// # Examples
///
/// ```
/// use dubboctl::merge::yaml::overlay;
///
/// let base: serde_yaml::Value = serde_yaml::from_str("admin:\n  enabled: true").unwrap();
/// let user: serde_yaml::Value = serde_yaml::from_str("admin:\n  replicas: 2").unwrap();
/// let merged = overlay(&base, &user);
/// assert_eq!(merged["admin"]["enabled"], serde_yaml::Value::Bool(true));
/// assert_eq!(merged["admin"]["replicas"], serde_yaml::Value::from(2));
/// ```
pub fn overlay(base: &YamlValue, overlay: &YamlValue) -> YamlValue {
    let mut merged = base.clone();
    merge_into(&mut merged, overlay, "");
    merged
}

/// Fold a list of documents left-to-right with [`overlay`].
///
/// An empty list yields an empty mapping.
pub fn overlay_all<'a, I>(documents: I) -> YamlValue
where
    I: IntoIterator<Item = &'a YamlValue>,
{
    documents
        .into_iter()
        .fold(YamlValue::Mapping(Mapping::new()), |acc, doc| {
            overlay(&acc, doc)
        })
}

fn merge_into(target: &mut YamlValue, source: &YamlValue, path: &str) {
    match (target, source) {
        (YamlValue::Mapping(target_map), YamlValue::Mapping(source_map)) => {
            for (key, value) in source_map {
                let key_str = match key {
                    YamlValue::String(s) => s.clone(),
                    _ => format!("{:?}", key),
                };
                let new_path = if path.is_empty() {
                    key_str
                } else {
                    format!("{}.{}", path, key_str)
                };

                match target_map.get_mut(key) {
                    Some(existing) => merge_into(existing, value, &new_path),
                    None => {
                        target_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, source) => {
            if get_yaml_type_name(target) != get_yaml_type_name(source) {
                debug!(
                    "Replacing {} with {} at '{}'",
                    get_yaml_type_name(target),
                    get_yaml_type_name(source),
                    path
                );
            }
            *target = source.clone();
        }
    }
}

/// Look up the value at `path`, if every segment exists.
pub fn get_path<'a>(value: &'a YamlValue, path: &[PathSegment]) -> Option<&'a YamlValue> {
    path.iter().try_fold(value, |current, segment| match segment {
        PathSegment::Key(key) => current.as_mapping()?.get(key.as_str()),
        PathSegment::Index(idx) => current.as_sequence()?.get(*idx),
    })
}

/// How many `null` elements an index may add past the end of a sequence.
pub const MAX_SEQUENCE_PADDING: usize = 1024;

/// Navigate to `path` within a document, creating intermediate levels as needed.
///
/// Missing keys become empty mappings, `null` nodes are treated as empty
/// containers of whatever kind the next segment needs, and sequences are
/// padded with `null` up to an addressed index, at most
/// [`MAX_SEQUENCE_PADDING`] elements past the current end.
///
/// # Errors
///
/// Returns `Error::InvalidOverridePath` when a segment would have to pass
/// through a scalar, or index a mapping, or key into a sequence, or when an
/// index lies too far past the end of its sequence.
pub fn navigate_yaml_value<'a>(
    value: &'a mut YamlValue,
    path: &[PathSegment],
) -> Result<&'a mut YamlValue> {
    let mut current = value;
    for (depth, segment) in path.iter().enumerate() {
        if current.is_null() {
            *current = match segment {
                PathSegment::Key(_) => YamlValue::Mapping(Mapping::new()),
                PathSegment::Index(_) => YamlValue::Sequence(Vec::new()),
            };
        }

        current = match (segment, current) {
            (PathSegment::Key(key), YamlValue::Mapping(map)) => map
                .entry(YamlValue::String(key.clone()))
                .or_insert(YamlValue::Null),
            (PathSegment::Index(idx), YamlValue::Sequence(seq)) => {
                if idx.saturating_sub(seq.len()) >= MAX_SEQUENCE_PADDING {
                    return Err(Error::InvalidOverridePath {
                        path: format_path(path),
                        message: format!(
                            "index {} is more than {} past the end of '{}' (length {})",
                            idx,
                            MAX_SEQUENCE_PADDING,
                            format_path(&path[..depth]),
                            seq.len()
                        ),
                    });
                }
                while seq.len() <= *idx {
                    seq.push(YamlValue::Null);
                }
                &mut seq[*idx]
            }
            (segment, other) => {
                let expected = match segment {
                    PathSegment::Key(_) => "mapping",
                    PathSegment::Index(_) => "sequence",
                };
                return Err(Error::InvalidOverridePath {
                    path: format_path(path),
                    message: format!(
                        "expected {} at '{}' but found {}",
                        expected,
                        format_path(&path[..depth]),
                        get_yaml_type_name(other)
                    ),
                });
            }
        };
    }

    Ok(current)
}

/// Get a human-readable type name for a YAML value
///
/// Used for logging and error messages to describe the type of a value.
pub fn get_yaml_type_name(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "bool",
        YamlValue::Number(_) => "number",
        YamlValue::String(_) => "string",
        YamlValue::Sequence(_) => "sequence",
        YamlValue::Mapping(_) => "mapping",
        YamlValue::Tagged(_) => "tagged",
    }
}
