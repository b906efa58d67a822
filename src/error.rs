//! # Error Handling
//!
//! This module defines the centralized error type for `dubboctl`. It uses the
//! `thiserror` library to build one `Error` enum that covers every failure the
//! manifest pipeline can hit, each variant carrying enough context (file path,
//! override token, component name) to tell the user where things went wrong.
//!
//! The variants follow the pipeline stages:
//!
//! - Reading and parsing configuration files (`Read`, `Parse`).
//! - Parsing and applying `--set` overrides (`Override`, `InvalidOverridePath`).
//! - Resolving profiles (`Profile`).
//! - Decoding and validating the typed configuration (`Decode`, `Validation`).
//! - Running the operator and rendering charts (`Operator`, `Render`).
//! - Writing manifests to disk (`Write`).
//!
//! None of these are retried. Every error is terminal for the current
//! invocation and the CLI exits non-zero with the message.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dubboctl operations
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration, profile or chart file could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file was read but does not hold a usable YAML document.
    #[error("Failed to parse '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A `--set` token is malformed (for example it has no `=`).
    #[error("Invalid override '{token}': {message}")]
    Override { token: String, message: String },

    /// An override path runs through a node that cannot hold the next segment.
    #[error("Invalid override path '{path}': {message}")]
    InvalidOverridePath { path: String, message: String },

    /// A profile name is invalid or the profile cannot be found.
    #[error("Profile '{name}': {message}")]
    Profile { name: String, message: String },

    /// The merged document does not match the typed configuration.
    #[error("Failed to decode configuration: {message}")]
    Decode { message: String },

    /// The decoded configuration holds a value the operator cannot accept.
    #[error("Invalid configuration at '{field}': {message}")]
    Validation { field: String, message: String },

    /// The operator was used out of order.
    #[error("Operator error: {message}")]
    Operator { message: String },

    /// A component's chart failed to render.
    ///
    /// May include the name of the template variable that could not be resolved.
    #[error("Failed to render component '{component}': {message}{}", variable.as_ref().map(|v| format!(" (variable: {})", v)).unwrap_or_default())]
    Render {
        component: String,
        message: String,
        /// The template variable that caused the error, if applicable
        variable: Option<String>,
    },

    /// A rendered manifest could not be written.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
