//! Plugin system for smores
//! 
//! Plugins are YAML manifests found under the plugin directory. Each one
//! names its trigger patterns and a compiled-in handler; an optional
//! `config.yaml` in a directory named after the plugin carries its settings.

pub mod binder;
pub mod loader;
pub mod manifest;
pub mod registry;

pub use loader::{LoadReport, PluginLoader, PLUGIN_SUFFIX};
pub use manifest::{PluginManifest, TriggerList};
pub use registry::{PluginRegistry, RegistrySnapshot};
