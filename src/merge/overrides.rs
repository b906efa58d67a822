//! `--set` overrides
//!
//! A set override is a single `path.to.key=value` token. The path uses the
//! syntax of [`parse_path`](super::parse_path); the value is parsed as YAML so
//! that `replicas=3` sets a number, `enabled=true` a bool and `ports=[80, 443]`
//! a sequence. Text that is not valid YAML is kept as a plain string.
//!
//! Overrides are applied after every file and profile has been merged, in the
//! order given, on a copy of the document. A failing override leaves the
//! input untouched.

use serde_yaml::Value as YamlValue;

use super::yaml::{get_path, navigate_yaml_value};
use super::{parse_path, PathSegment};
use crate::error::{Error, Result};

/// One parsed `key=value` token.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOverride {
    /// The path as written by the user, used in messages.
    pub raw_path: String,
    pub path: Vec<PathSegment>,
    pub value: YamlValue,
}

impl SetOverride {
    /// Parse a `path.to.key=value` token.
    ///
    /// The token is split at the first `=`, so values may themselves contain `=`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dubboctl::merge::overrides::SetOverride;
    ///
    /// let o = SetOverride::parse("admin.replicas=3").unwrap();
    /// assert_eq!(o.raw_path, "admin.replicas");
    /// assert_eq!(o.value, serde_yaml::Value::from(3));
    /// assert!(SetOverride::parse("admin.enabled").is_err());
    /// ```
    pub fn parse(token: &str) -> Result<Self> {
        let (raw_path, raw_value) = token.split_once('=').ok_or_else(|| Error::Override {
            token: token.to_string(),
            message: "expected KEY=VALUE".to_string(),
        })?;

        let raw_path = raw_path.trim();
        let path = parse_path(raw_path);
        if path.is_empty() {
            return Err(Error::Override {
                token: token.to_string(),
                message: "path is empty".to_string(),
            });
        }

        Ok(Self {
            raw_path: raw_path.to_string(),
            path,
            value: parse_value(raw_value),
        })
    }

    /// Whether this override addresses the single top-level key `key`.
    pub fn targets(&self, key: &str) -> bool {
        matches!(self.path.as_slice(), [PathSegment::Key(k)] if k == key)
    }
}

/// Parse the value half of a token as the most specific YAML it represents.
fn parse_value(raw: &str) -> YamlValue {
    if raw.trim().is_empty() {
        return YamlValue::String(raw.to_string());
    }
    match serde_yaml::from_str::<YamlValue>(raw) {
        Ok(YamlValue::Tagged(_)) | Err(_) => YamlValue::String(raw.to_string()),
        Ok(value) => value,
    }
}

/// Parse every token, failing on the first malformed one.
pub fn parse_overrides<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<SetOverride>> {
    tokens
        .iter()
        .map(|token| SetOverride::parse(token.as_ref()))
        .collect()
}

/// Apply overrides in order to a copy of `doc`.
///
/// # Errors
///
/// Returns `Error::InvalidOverridePath` if an override runs through a node
/// that cannot hold its next segment. Nothing is returned but the error in
/// that case.
pub fn apply_overrides(doc: &YamlValue, overrides: &[SetOverride]) -> Result<YamlValue> {
    let mut result = doc.clone();
    for set in overrides {
        let target = navigate_yaml_value(&mut result, &set.path)?;
        *target = set.value.clone();
    }
    Ok(result)
}

/// Parse and apply raw `--set` tokens to a copy of `doc`.
///
/// All tokens are parsed before any is applied.
pub fn apply_set_flags<S: AsRef<str>>(doc: &YamlValue, tokens: &[S]) -> Result<YamlValue> {
    let overrides = parse_overrides(tokens)?;
    apply_overrides(doc, &overrides)
}

/// Read back the value an override would address.
pub fn read_override<'a>(doc: &'a YamlValue, set: &SetOverride) -> Option<&'a YamlValue> {
    get_path(doc, &set.path)
}
