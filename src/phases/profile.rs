//! Phase 1: Profile Resolution
//!
//! A profile is a named, pre-packaged default configuration. Profiles are
//! looked up by name in a [`ProfileSource`]; the directory implementation
//! keeps one `<name>.yaml` per profile.
//!
//! Every profile inherits from `default`: loading `demo` reads
//! `default.yaml` and overlays `demo.yaml` on it, so a profile file only has
//! to state what it changes.

use log::debug;
use serde_yaml::Value as YamlValue;
use std::fs;
use std::path::{Path, PathBuf};

use super::loader::read_yaml_file;
use crate::defaults::DEFAULT_PROFILE;
use crate::error::{Error, Result};
use crate::merge::yaml::overlay;

/// A lookup-by-name source of profile documents.
pub trait ProfileSource {
    /// Load the merged document for profile `name`.
    fn load(&self, name: &str) -> Result<YamlValue>;

    /// Names of every available profile, sorted.
    fn list(&self) -> Result<Vec<String>>;
}

/// Profiles stored as `<root>/<name>.yaml`.
#[derive(Debug, Clone)]
pub struct DirProfileSource {
    root: PathBuf,
}

impl DirProfileSource {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn profile_file(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.yaml", name))
    }

    fn read_profile(&self, name: &str) -> Result<YamlValue> {
        let path = self.profile_file(name);
        if !path.is_file() {
            return Err(Error::Profile {
                name: name.to_string(),
                message: format!("no profile file at '{}'", path.display()),
            });
        }
        debug!("Reading profile '{}' from {}", name, path.display());
        read_yaml_file(&path)
    }
}

impl ProfileSource for DirProfileSource {
    fn load(&self, name: &str) -> Result<YamlValue> {
        validate_profile_name(name)?;

        let base = self.read_profile(DEFAULT_PROFILE)?;
        if name == DEFAULT_PROFILE {
            return Ok(base);
        }
        let profile = self.read_profile(name)?;
        Ok(overlay(&base, &profile))
    }

    fn list(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|source| Error::Read {
            path: self.root.clone(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "yaml") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Reject names that are empty or would escape the profile directory.
pub fn validate_profile_name(name: &str) -> Result<()> {
    let invalid = |message: &str| Error::Profile {
        name: name.to_string(),
        message: message.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("profile name is empty"));
    }
    if name.contains(['/', '\\']) || name.contains("..") {
        return Err(invalid("profile name must not contain path separators"));
    }
    Ok(())
}
