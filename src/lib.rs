//! # dubboctl
//!
//! This library generates the manifests of a Dubbo control plane installation
//! from layered configuration. It is used by the `dubboctl` command-line tool
//! but every stage is available on its own.
//!
//! ## Quick Example
//!
//! ```
//! use dubboctl::merge::overrides::apply_set_flags;
//! use dubboctl::merge::yaml::overlay;
//!
//! // Profile defaults and a user file
//! let profile: serde_yaml::Value = serde_yaml::from_str("admin:\n  enabled: true").unwrap();
//! let user: serde_yaml::Value = serde_yaml::from_str("admin:\n  replicas: 2").unwrap();
//!
//! // Overlay the user file on the profile, then apply --set flags
//! let merged = overlay(&profile, &user);
//! let merged = apply_set_flags(&merged, &["admin.replicas=3"]).unwrap();
//!
//! assert_eq!(merged["admin"]["enabled"], serde_yaml::Value::Bool(true));
//! assert_eq!(merged["admin"]["replicas"], serde_yaml::Value::from(3));
//! ```
//!
//! ## Core Concepts
//!
//! - **Profiles (`phases::profile`)**: Named default configurations. Every
//!   profile inherits from `default`.
//! - **Overlay (`merge`)**: Deep merge of configuration documents, where the
//!   later document wins, and `path.to.key=value` overrides applied on top.
//! - **Configuration (`config`)**: The typed form of the merged document and
//!   the set of components the operator knows.
//! - **Operator (`phases::operator`)**: Resolves the enabled components and
//!   renders each one's chart through a `ChartRenderer`.
//! - **Collation (`phases::collate`)**: Deterministic, name-ordered output to
//!   stdout or to one file per component.
//!
//! ## Execution Flow
//!
//! `phases::orchestrator` runs the stages in order:
//!
//! 1.  **Load**: Merge the user's configuration files and pick the profile.
//! 2.  **Profile**: Load the profile's defaults.
//! 3.  **Overlay**: Layer the user configuration over the profile, then apply
//!     `--set` overrides.
//! 4.  **Decode**: Decode into `ResolvedConfig` and record the source paths.
//! 5.  **Render**: Run the operator and render every enabled component.
//! 6.  **Output**: Print the sorted manifests or write them to a directory.
//!
//! Any failure aborts the whole run. The pipeline only renders; it never
//! talks to a cluster.

pub mod config;
pub mod defaults;
pub mod error;
pub mod merge;
pub mod phases;

#[cfg(test)]
mod merge_proptest;
