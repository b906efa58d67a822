//! # Manifest Generation Pipeline
//!
//! This module implements the stages that turn layered configuration into
//! rendered manifests. Each stage consumes only what the previous one
//! produced; there is no feedback between them.
//!
//! ## The Pipeline
//!
//! 1.  **Profile Resolution (`profile`)**: Load the named profile's default
//!     configuration. Every profile inherits from `default`.
//!
//! 2.  **Configuration Loading (`loader`)**: Read the user's configuration
//!     files, merge them left-to-right and determine the profile they select.
//!
//! 3.  **Overlay**: Merge the user configuration over the profile and apply
//!     `--set` overrides on top (see [`crate::merge`]).
//!
//! 4.  **Decoding**: Decode the merged document into a typed
//!     [`ResolvedConfig`](crate::config::ResolvedConfig) and inject the
//!     profile and chart source paths.
//!
//! 5.  **Operator (`operator`, `render`)**: Validate the configuration,
//!     resolve the enabled components and render each one's chart.
//!
//! 6.  **Collation (`collate`)**: Sort the manifests by component name and
//!     print them as one YAML stream or write one file per component.
//!
//! `orchestrator` runs the stages in order. Every stage fails the whole
//! invocation on error; nothing is partially rendered.

pub mod collate;
pub mod loader;
pub mod operator;
pub mod orchestrator;
pub mod profile;
pub mod render;
