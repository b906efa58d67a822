//! Default values for dubboctl configuration.
//!
//! This module provides centralized default values used across the pipeline
//! and the commands, so the CLI, the loader and the decoder agree on them.

use std::path::PathBuf;

/// Profile selected when neither the configuration files nor `--set` name one.
pub const DEFAULT_PROFILE: &str = "default";

/// Namespace the control plane is rendered into when none is configured.
pub const DEFAULT_NAMESPACE: &str = "dubbo-system";

/// Reserved top-level field that selects the profile.
pub const PROFILE_FIELD: &str = "profile";

/// Returns the default directory holding `<profile>.yaml` files.
///
/// This can be overridden by the `--profiles` CLI flag or the
/// `DUBBOCTL_PROFILES` environment variable.
pub fn default_profiles_path() -> PathBuf {
    PathBuf::from("deploy").join("profiles")
}

/// Returns the default directory holding one chart directory per component.
///
/// This can be overridden by the `--charts` CLI flag or the
/// `DUBBOCTL_CHARTS` environment variable.
pub fn default_charts_path() -> PathBuf {
    PathBuf::from("deploy").join("charts")
}
