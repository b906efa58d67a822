//! Phase 2: Configuration Loading
//!
//! Reads the user's configuration files, merges them left-to-right and works
//! out which profile the result asks for.
//!
//! The profile has to be known before the profile itself can be loaded and
//! merged underneath the user's files, so it is read from the untyped
//! document here rather than from the typed configuration later on. A
//! `profile=<name>` set flag beats the `profile` field of the files.

use log::debug;
use serde_yaml::{Mapping, Value as YamlValue};
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults::{DEFAULT_PROFILE, PROFILE_FIELD};
use crate::error::{Error, Result};
use crate::merge::overrides::parse_overrides;
use crate::merge::yaml::overlay;

/// The merged user configuration and the profile it selects.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub document: YamlValue,
    pub profile: String,
}

/// Read and parse one configuration file.
///
/// An empty file is an empty mapping. Anything that is not a mapping at the
/// top level is rejected.
pub fn read_yaml_file(path: &Path) -> Result<YamlValue> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value: YamlValue = serde_yaml::from_str(&content).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    match value {
        YamlValue::Null => Ok(YamlValue::Mapping(Mapping::new())),
        YamlValue::Mapping(_) => Ok(value),
        _ => Err(Error::Parse {
            path: path.to_path_buf(),
            message: "top-level value must be a mapping".to_string(),
        }),
    }
}

/// Merge `files` in order and pick the profile.
///
/// Set tokens are only inspected here, not applied; a malformed token fails
/// the load before any file is read.
pub fn load<S: AsRef<str>>(files: &[PathBuf], set_flags: &[S]) -> Result<LoadedConfig> {
    let overrides = parse_overrides(set_flags)?;

    let mut document = YamlValue::Mapping(Mapping::new());
    for file in files {
        debug!("Loading configuration file {}", file.display());
        let value = read_yaml_file(file)?;
        document = overlay(&document, &value);
    }

    let from_flags = overrides
        .iter()
        .rev()
        .find(|set| set.targets(PROFILE_FIELD))
        .and_then(|set| profile_name(&set.value));
    let from_document = document.get(PROFILE_FIELD).and_then(profile_name);

    let profile = from_flags
        .or(from_document)
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

    debug!("Selected profile '{}'", profile);
    Ok(LoadedConfig { document, profile })
}

/// A profile name from a scalar; blank names select nothing.
fn profile_name(value: &YamlValue) -> Option<String> {
    let name = match value {
        YamlValue::String(s) => s.trim().to_string(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!name.is_empty()).then_some(name)
}
