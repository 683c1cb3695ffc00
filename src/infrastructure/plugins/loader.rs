//! Plugin loader - Discovers plugin manifests and config documents on disk

use std::path::{Path, PathBuf};
use crate::application::errors::PluginError;
use crate::infrastructure::config::ConfigScope;
use crate::plugins::{HandlerCatalog, PluginDescriptor};
use super::binder::{self, CONFIG_FILE, CONFIG_TEMPLATES};
use super::manifest::PluginManifest;
use super::registry::PluginRegistry;

/// Suffix of loadable plugin manifests
pub const PLUGIN_SUFFIX: &str = ".yaml";

/// Outcome of one directory walk
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Trigger names registered, in discovery order
    pub loaded: Vec<String>,
    /// Slugs that received a config document; the first document per slug wins
    pub configured: Vec<String>,
    /// Everything that was skipped, with the reason
    pub failures: Vec<PluginError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Plugin loader
pub struct PluginLoader {
    plugin_dir: PathBuf,
    catalog: HandlerCatalog,
}

impl PluginLoader {
    pub fn new(plugin_dir: impl Into<PathBuf>, catalog: HandlerCatalog) -> Self {
        Self {
            plugin_dir: plugin_dir.into(),
            catalog,
        }
    }

    /// Load a single plugin manifest
    pub fn load_plugin(&self, path: impl AsRef<Path>) -> Result<PluginDescriptor, PluginError> {
        let path = path.as_ref();
        PluginManifest::from_file(path)?
            .into_descriptor(&self.catalog)
            .map_err(|reason| PluginError::load(path, reason))
    }

    /// Walk the plugin directory, registering plugins and storing their config.
    ///
    /// Broken plugins and config documents are logged and skipped; a missing
    /// directory just means no plugins.
    pub fn load_all(&self, registry: &PluginRegistry, scope: &mut ConfigScope) -> LoadReport {
        let mut report = LoadReport::default();

        if !self.plugin_dir.is_dir() {
            tracing::warn!("Plugin directory does not exist: {}", self.plugin_dir.display());
            return report;
        }

        self.walk(&self.plugin_dir, Path::new(""), registry, scope, &mut report);

        tracing::info!(
            "Loaded {} plugins ({} configured, {} skipped) from {}",
            report.loaded.len(),
            report.configured.len(),
            report.failures.len(),
            self.plugin_dir.display()
        );
        report
    }

    fn walk(
        &self,
        dir: &Path,
        relative: &Path,
        registry: &PluginRegistry,
        scope: &mut ConfigScope,
        report: &mut LoadReport,
    ) {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to read plugin directory {}: {}", dir.display(), e);
                return;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
                continue;
            };

            // Skip hidden entries
            if name.starts_with('.') {
                continue;
            }

            if path.is_dir() {
                self.walk(&path, &relative.join(&name), registry, scope, report);
            } else if name == CONFIG_FILE {
                self.bind_config(&path, relative, scope, report);
            } else if CONFIG_TEMPLATES.contains(&name.as_str()) {
                continue;
            } else if let Some(slug) = binder::plugin_slug(&name, PLUGIN_SUFFIX) {
                self.register_plugin(&path, slug, registry, report);
            } else {
                tracing::debug!("Ignoring non-plugin file: {}", path.display());
            }
        }
    }

    fn register_plugin(&self, path: &Path, slug: String, registry: &PluginRegistry, report: &mut LoadReport) {
        let result = self
            .load_plugin(path)
            .and_then(|descriptor| {
                let trigger = descriptor.trigger_name().to_string();
                registry.register(descriptor, slug).map(|()| trigger)
            });

        match result {
            Ok(trigger) => {
                tracing::debug!("Plugin loaded successfully: {}", path.display());
                report.loaded.push(trigger);
            }
            Err(e) => {
                tracing::warn!("There was a problem loading the plugin {}: {}", path.display(), e);
                report.failures.push(e);
            }
        }
    }

    fn bind_config(&self, path: &Path, relative: &Path, scope: &mut ConfigScope, report: &mut LoadReport) {
        let slug = binder::config_slug(relative);
        if slug.is_empty() {
            tracing::warn!("Ignoring {} at the plugin root: it belongs to no plugin", path.display());
            return;
        }

        if scope.plugin_config(&slug).is_some() {
            let err = PluginError::DuplicateConfig {
                slug,
                path: path.to_path_buf(),
            };
            tracing::warn!("{}", err);
            report.failures.push(err);
            return;
        }

        match binder::read_config(&slug, path) {
            Ok(value) => {
                tracing::debug!("Config loaded for plugin: {}", slug);
                scope.insert_plugin_config(slug.clone(), value);
                report.configured.push(slug);
            }
            Err(e) => {
                tracing::warn!("Plugin '{}' will run without config: {}", slug, e);
                report.failures.push(e);
            }
        }
    }
}
