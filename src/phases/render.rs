//! Chart rendering
//!
//! The operator does not know how charts are executed; it hands a component
//! and its values to a [`ChartRenderer`] and gets manifest text back.
//!
//! [`TemplateRenderer`] is the built-in implementation. A chart is a
//! directory `<charts>/<component>/` holding:
//!
//! - `values.yaml` (optional): chart defaults, overlaid by the component's
//!   configured values
//! - `templates/*.yaml`: manifest templates, rendered in file name order
//!
//! Templates reference values with `{{ .Values.path.to.key }}`. Each rendered
//! template becomes one or more YAML documents; templates that render to
//! nothing are dropped.

use glob::{glob, Pattern};
use log::debug;
use regex::{Captures, Regex};
use serde_yaml::Value as YamlValue;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::collate::YAML_SEPARATOR;
use super::loader::read_yaml_file;
use crate::config::ComponentName;
use crate::error::{Error, Result};
use crate::merge::parse_path;
use crate::merge::yaml::{get_path, get_yaml_type_name, overlay};

/// Renders one component's chart with the given values.
pub trait ChartRenderer: Sync {
    fn render(
        &self,
        component: ComponentName,
        chart_root: &Path,
        values: &YamlValue,
    ) -> Result<String>;
}

/// Directory-based chart renderer with `{{ .Values.x }}` placeholders.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    fn templates(component: ComponentName, chart_dir: &Path) -> Result<Vec<PathBuf>> {
        let templates_dir = chart_dir.join("templates");
        let escaped = Pattern::escape(&templates_dir.to_string_lossy());

        let mut templates = Vec::new();
        for ext in ["yaml", "yml"] {
            let pattern = format!("{}/*.{}", escaped, ext);
            let paths = glob(&pattern).map_err(|e| Error::Render {
                component: component.to_string(),
                message: format!("invalid template pattern '{}': {}", pattern, e),
                variable: None,
            })?;
            for path in paths.flatten() {
                if path.is_file() {
                    templates.push(path);
                }
            }
        }
        templates.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(templates)
    }
}

impl ChartRenderer for TemplateRenderer {
    fn render(
        &self,
        component: ComponentName,
        chart_root: &Path,
        values: &YamlValue,
    ) -> Result<String> {
        let render_error = |message: String| Error::Render {
            component: component.to_string(),
            message,
            variable: None,
        };

        let chart_dir = chart_root.join(component.as_str());
        if !chart_dir.is_dir() {
            return Err(render_error(format!(
                "chart directory '{}' not found",
                chart_dir.display()
            )));
        }

        let defaults_file = chart_dir.join("values.yaml");
        let values = if defaults_file.is_file() {
            let defaults = read_yaml_file(&defaults_file)
                .map_err(|e| render_error(format!("chart values: {}", e)))?;
            overlay(&defaults, values)
        } else {
            values.clone()
        };

        let templates = Self::templates(component, &chart_dir)?;
        if templates.is_empty() {
            return Err(render_error(format!(
                "chart '{}' has no templates",
                chart_dir.display()
            )));
        }

        let mut documents = Vec::new();
        for template in &templates {
            debug!("Rendering {} for {}", template.display(), component);
            let source = fs::read_to_string(template).map_err(|e| {
                render_error(format!(
                    "failed to read template '{}': {}",
                    template.display(),
                    e
                ))
            })?;
            let rendered = render_template(component, &source, &values)?;
            let body = strip_separators(&rendered);
            if !body.is_empty() {
                documents.push(body.to_string());
            }
        }

        Ok(documents.join(YAML_SEPARATOR))
    }
}

/// Trim whitespace and any leading or trailing `---` lines.
fn strip_separators(text: &str) -> &str {
    let mut body = text.trim();
    while let Some(rest) = body
        .strip_prefix("---")
        .or_else(|| body.strip_suffix("---"))
    {
        body = rest.trim();
    }
    body
}

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{-?\s*\.Values\.([^\s}]+)\s*-?\}\}").expect("placeholder regex is valid")
    })
}

/// Substitute every `{{ .Values.path }}` in `source`.
///
/// # Errors
///
/// Returns `Error::Render` naming the variable if a path is missing or does
/// not hold a scalar.
pub fn render_template(component: ComponentName, source: &str, values: &YamlValue) -> Result<String> {
    let mut failure: Option<(String, String)> = None;
    let rendered = placeholder().replace_all(source, |caps: &Captures| {
        let variable = &caps[1];
        let text = match get_path(values, &parse_path(variable)) {
            Some(value) => scalar_text(value)
                .map_err(|type_name| format!("value is a {}, not a scalar", type_name)),
            None => Err("value is not defined".to_string()),
        };
        text.unwrap_or_else(|message| {
            if failure.is_none() {
                failure = Some((variable.to_string(), message));
            }
            String::new()
        })
    });

    match failure {
        Some((variable, message)) => Err(Error::Render {
            component: component.to_string(),
            message,
            variable: Some(variable),
        }),
        None => Ok(rendered.into_owned()),
    }
}

fn scalar_text(value: &YamlValue) -> std::result::Result<String, &'static str> {
    match value {
        YamlValue::Null => Ok(String::new()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::String(s) => Ok(s.clone()),
        other => Err(get_yaml_type_name(other)),
    }
}
