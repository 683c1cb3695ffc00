//! Configuration binder - parses per-plugin configuration documents

use std::path::Path;
use serde_json::Value;
use crate::application::errors::PluginError;

/// Name of the per-plugin configuration file
pub const CONFIG_FILE: &str = "config.yaml";

/// Distributable templates of the configuration file, never loaded
pub const CONFIG_TEMPLATES: [&str; 2] = ["config.yaml-dist", "config.yaml.dist"];

/// Parse a configuration document for `slug`. YAML, so plain JSON works too.
pub fn parse_config(slug: &str, content: &str) -> Result<Value, PluginError> {
    serde_yaml::from_str::<Value>(content).map_err(|e| PluginError::ConfigParse {
        slug: slug.to_string(),
        reason: e.to_string(),
    })
}

pub fn read_config(slug: &str, path: &Path) -> Result<Value, PluginError> {
    let content = std::fs::read_to_string(path).map_err(|e| PluginError::ConfigParse {
        slug: slug.to_string(),
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;
    parse_config(slug, &content)
}

/// Slug for a configuration file: its directory relative to the plugin root,
/// separators dropped (`sendgrid/config.yaml` -> `sendgrid`)
pub fn config_slug(relative_dir: &Path) -> String {
    relative_dir
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect()
}

/// Slug for a plugin manifest: file name without its suffix
pub fn plugin_slug(file_name: &str, suffix: &str) -> Option<String> {
    file_name
        .strip_suffix(suffix)
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}
