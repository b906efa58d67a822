//! # Typed Configuration
//!
//! This module defines `ResolvedConfig`, the strongly-typed form of the
//! merged configuration document, and the closed set of components the
//! operator knows how to render.
//!
//! ## Document Shape
//!
//! ```yaml
//! profile: default
//! namespace: dubbo-system
//! admin:
//!   enabled: true
//!   replicas: 2
//!   image: apache/dubbo-admin:0.6.0   # free-form, passed to the chart
//! proxy:
//!   enabled: false
//! ```
//!
//! Only `profile`, `namespace` and each component's `enabled`/`replicas` are
//! typed. Every other key under a component is kept as-is and handed to that
//! component's chart. Unknown top-level keys are ignored.
//!
//! The two source paths (`profile_path`, `chart_path`) are never read from the
//! document. They are injected by [`ResolvedConfig::decode`] from the
//! resolution inputs.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value as YamlValue};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::defaults::{DEFAULT_NAMESPACE, DEFAULT_PROFILE};
use crate::error::{Error, Result};

/// One logical control plane component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentName {
    Admin,
    Grafana,
    Nacos,
    Prometheus,
    Proxy,
    Skywalking,
    Zipkin,
    Zookeeper,
}

impl ComponentName {
    /// Every component the operator can render.
    pub const ALL: [ComponentName; 8] = [
        ComponentName::Admin,
        ComponentName::Grafana,
        ComponentName::Nacos,
        ComponentName::Prometheus,
        ComponentName::Proxy,
        ComponentName::Skywalking,
        ComponentName::Zipkin,
        ComponentName::Zookeeper,
    ];

    /// Name used for the configuration key, chart directory and output file.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentName::Admin => "admin",
            ComponentName::Grafana => "grafana",
            ComponentName::Nacos => "nacos",
            ComponentName::Prometheus => "prometheus",
            ComponentName::Proxy => "proxy",
            ComponentName::Skywalking => "skywalking",
            ComponentName::Zipkin => "zipkin",
            ComponentName::Zookeeper => "zookeeper",
        }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ComponentName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("unknown component '{}'", s))
    }
}

/// Settings for one component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    /// Components are rendered only when explicitly enabled.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
    /// Everything else, passed through to the chart.
    #[serde(flatten)]
    pub values: Mapping,
}

impl ComponentSpec {
    /// Values handed to the chart: the free-form settings plus `replicas`
    /// and, unless the component sets its own, the install namespace.
    pub fn chart_values(&self, namespace: &str) -> YamlValue {
        let mut values = self.values.clone();
        if let Some(replicas) = self.replicas {
            values.insert(YamlValue::from("replicas"), YamlValue::from(replicas));
        }
        if !values.contains_key("namespace") {
            values.insert(YamlValue::from("namespace"), YamlValue::from(namespace));
        }
        YamlValue::Mapping(values)
    }
}

/// The fully merged, typed configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<ComponentSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grafana: Option<ComponentSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nacos: Option<ComponentSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prometheus: Option<ComponentSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ComponentSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skywalking: Option<ComponentSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipkin: Option<ComponentSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zookeeper: Option<ComponentSpec>,

    /// Directory profiles were resolved from.
    #[serde(skip)]
    pub profile_path: PathBuf,
    /// Directory charts are looked up in.
    #[serde(skip)]
    pub chart_path: PathBuf,
}

impl ResolvedConfig {
    /// Decode a merged document and record where profiles and charts live.
    ///
    /// A `null` document (for example an empty profile with no user files)
    /// decodes as an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` if a known field holds a value of the wrong
    /// type, such as `admin.enabled: maybe`.
    pub fn decode(doc: &YamlValue, profile_path: &Path, chart_path: &Path) -> Result<Self> {
        let doc = match doc {
            YamlValue::Null => YamlValue::Mapping(Mapping::new()),
            other => other.clone(),
        };
        let mut config: ResolvedConfig =
            serde_yaml::from_value(doc).map_err(|e| Error::Decode {
                message: e.to_string(),
            })?;
        config.profile_path = profile_path.to_path_buf();
        config.chart_path = chart_path.to_path_buf();
        Ok(config)
    }

    /// Return a copy with `profile` and `namespace` filled in when absent.
    pub fn with_defaults(self) -> Self {
        Self {
            profile: self
                .profile
                .filter(|p| !p.is_empty())
                .or_else(|| Some(DEFAULT_PROFILE.to_string())),
            namespace: self
                .namespace
                .filter(|ns| !ns.is_empty())
                .or_else(|| Some(DEFAULT_NAMESPACE.to_string())),
            ..self
        }
    }

    /// The namespace components are rendered into.
    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Settings for `name`, if the document mentions it at all.
    pub fn component(&self, name: ComponentName) -> Option<&ComponentSpec> {
        match name {
            ComponentName::Admin => self.admin.as_ref(),
            ComponentName::Grafana => self.grafana.as_ref(),
            ComponentName::Nacos => self.nacos.as_ref(),
            ComponentName::Prometheus => self.prometheus.as_ref(),
            ComponentName::Proxy => self.proxy.as_ref(),
            ComponentName::Skywalking => self.skywalking.as_ref(),
            ComponentName::Zipkin => self.zipkin.as_ref(),
            ComponentName::Zookeeper => self.zookeeper.as_ref(),
        }
    }

    /// Components with `enabled: true`, in declaration order.
    pub fn enabled_components(&self) -> Vec<ComponentName> {
        ComponentName::ALL
            .into_iter()
            .filter(|name| self.component(*name).is_some_and(|spec| spec.enabled))
            .collect()
    }
}
