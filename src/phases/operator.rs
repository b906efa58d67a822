//! Phase 5: Operator
//!
//! The operator owns the resolved configuration for the rest of the run. It
//! works in two steps:
//!
//! 1. [`Operator::run`] applies defaults, validates the configuration and
//!    resolves which components are enabled.
//! 2. [`Operator::render_manifest`] renders every enabled component's chart.
//!
//! Rendering is all-or-nothing. Components are independent, so they are
//! rendered in parallel; the result is a map and is ordered later by the
//! collator, never by completion order.

use log::{debug, info};
use rayon::prelude::*;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::render::ChartRenderer;
use crate::config::{ComponentName, ResolvedConfig};
use crate::error::{Error, Result};

/// Rendered manifest text per component.
pub type ManifestSet = HashMap<ComponentName, String>;

/// Resolves and renders the components of one configuration.
pub struct Operator<'r> {
    config: ResolvedConfig,
    renderer: &'r dyn ChartRenderer,
    /// Set by `run`; `None` until then.
    enabled: Option<Vec<ComponentName>>,
}

impl<'r> Operator<'r> {
    pub fn new(config: ResolvedConfig, renderer: &'r dyn ChartRenderer) -> Self {
        Self {
            config,
            renderer,
            enabled: None,
        }
    }

    /// The configuration as it stands (defaulted once `run` has succeeded).
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Components resolved by `run`, in declaration order.
    pub fn enabled_components(&self) -> Option<&[ComponentName]> {
        self.enabled.as_deref()
    }

    /// Normalize and validate the configuration, then resolve enabled components.
    pub fn run(&mut self) -> Result<()> {
        let config = self.config.clone().with_defaults();
        validate(&config)?;

        let enabled = config.enabled_components();
        for name in ComponentName::ALL {
            if enabled.contains(&name) {
                info!("Component {} enabled", name);
            } else {
                debug!("Component {} disabled, skipping", name);
            }
        }

        self.config = config;
        self.enabled = Some(enabled);
        Ok(())
    }

    /// Render every enabled component.
    ///
    /// # Errors
    ///
    /// Returns `Error::Operator` if `run` has not succeeded, or the first
    /// component's `Error::Render`; no partial set is ever returned.
    pub fn render_manifest(&self) -> Result<ManifestSet> {
        let enabled = self.enabled.as_ref().ok_or_else(|| Error::Operator {
            message: "operator has not been run; call run() before render_manifest()".to_string(),
        })?;

        let namespace = self.config.namespace();
        let chart_path = self.config.chart_path.as_path();

        enabled
            .par_iter()
            .map(|&name| -> Result<(ComponentName, String)> {
                let values = self
                    .config
                    .component(name)
                    .map(|spec| spec.chart_values(namespace))
                    .unwrap_or_default();
                debug!("Rendering component {}", name);
                let text = self.renderer.render(name, chart_path, &values)?;
                Ok((name, text))
            })
            .collect()
    }
}

fn dns_label() -> &'static Regex {
    static DNS_LABEL: OnceLock<Regex> = OnceLock::new();
    DNS_LABEL.get_or_init(|| {
        Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("DNS label regex is valid")
    })
}

fn validate(config: &ResolvedConfig) -> Result<()> {
    let namespace = config.namespace();
    if namespace.len() > 63 || !dns_label().is_match(namespace) {
        return Err(Error::Validation {
            field: "namespace".to_string(),
            message: format!("'{}' is not a valid DNS-1123 label", namespace),
        });
    }

    if config.chart_path.as_os_str().is_empty() {
        return Err(Error::Validation {
            field: "chart_path".to_string(),
            message: "chart path is empty".to_string(),
        });
    }

    for name in ComponentName::ALL {
        if let Some(0) = config.component(name).and_then(|spec| spec.replicas) {
            return Err(Error::Validation {
                field: format!("{}.replicas", name),
                message: "must be at least 1".to_string(),
            });
        }
    }

    Ok(())
}
