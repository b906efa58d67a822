//! Orchestrator for `manifest generate`
//!
//! This module wires the phases together into the two halves of the
//! command:
//!
//! - [`generate_values`]: load user files, resolve the profile, overlay the
//!   user configuration on the profile, apply `--set` flags and decode.
//! - [`generate_manifests`]: run the operator, render, and collate to stdout
//!   text or to a directory.

use log::debug;
use serde_yaml::Value as YamlValue;
use std::path::PathBuf;

use super::collate::{sort_manifests, write_manifests};
use super::loader;
use super::operator::Operator;
use super::profile::{DirProfileSource, ProfileSource};
use super::render::{ChartRenderer, TemplateRenderer};
use crate::config::ResolvedConfig;
use crate::defaults::{default_charts_path, default_profiles_path, PROFILE_FIELD};
use crate::error::Result;
use crate::merge::overrides::apply_set_flags;
use crate::merge::yaml::overlay;

/// Inputs of one `manifest generate` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    /// User configuration files, lowest precedence first.
    pub files: Vec<PathBuf>,
    pub charts_path: PathBuf,
    pub profiles_path: PathBuf,
    /// Directory for `<component>.yaml` files; stdout when `None`.
    pub output: Option<PathBuf>,
    /// Raw `path=value` tokens, applied last.
    pub set_flags: Vec<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            charts_path: default_charts_path(),
            profiles_path: default_profiles_path(),
            output: None,
            set_flags: Vec::new(),
        }
    }
}

impl GenerateOptions {
    /// Return a copy with empty chart and profile paths replaced by the
    /// default locations.
    pub fn with_defaults(self) -> Self {
        fn or_default(path: PathBuf, default: fn() -> PathBuf) -> PathBuf {
            if path.as_os_str().is_empty() {
                default()
            } else {
                path
            }
        }

        Self {
            charts_path: or_default(self.charts_path, default_charts_path),
            profiles_path: or_default(self.profiles_path, default_profiles_path),
            ..self
        }
    }
}

/// What `generate_manifests` produced.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutput {
    /// Sorted, separator-terminated manifests concatenated into one stream.
    Printed(String),
    /// Files written to the output directory, in component name order.
    Written(Vec<PathBuf>),
}

/// Resolve the final configuration document and decode it.
///
/// Precedence, lowest first: profile, user files (in order), set flags.
/// Returns the typed configuration together with the merged document it
/// was decoded from.
pub fn generate_values(
    opts: &GenerateOptions,
    profiles: &dyn ProfileSource,
) -> Result<(ResolvedConfig, YamlValue)> {
    let loaded = loader::load(&opts.files, &opts.set_flags)?;
    let profile = profiles.load(&loaded.profile)?;

    let merged = overlay(&profile, &loaded.document);
    let mut merged = apply_set_flags(&merged, &opts.set_flags)?;
    if let Some(field) = merged.get_mut(PROFILE_FIELD) {
        *field = YamlValue::String(loaded.profile.clone());
    }
    debug!("Resolved configuration using profile '{}'", loaded.profile);

    let config = ResolvedConfig::decode(&merged, &opts.profiles_path, &opts.charts_path)?;
    Ok((config, merged))
}

/// Render the configuration and deliver the manifests.
pub fn generate_manifests(
    opts: &GenerateOptions,
    config: ResolvedConfig,
    renderer: &dyn ChartRenderer,
) -> Result<GenerateOutput> {
    let mut operator = Operator::new(config, renderer);
    operator.run()?;
    let manifests = operator.render_manifest()?;

    match &opts.output {
        Some(dir) => Ok(GenerateOutput::Written(write_manifests(&manifests, dir)?)),
        None => Ok(GenerateOutput::Printed(sort_manifests(&manifests).concat())),
    }
}

/// Run the whole pipeline against the on-disk profiles and charts.
pub fn execute_generate(opts: &GenerateOptions) -> Result<GenerateOutput> {
    let profiles = DirProfileSource::new(&opts.profiles_path);
    let (config, _) = generate_values(opts, &profiles)?;
    generate_manifests(opts, config, &TemplateRenderer::new())
}
