//! Plugin manifest definition

use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::application::errors::PluginError;
use crate::plugins::{HandlerCatalog, PluginDescriptor, Triggers};

/// One pattern or an ordered list of patterns
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TriggerList {
    One(String),
    Many(Vec<String>),
}

impl TriggerList {
    pub fn sources(&self) -> &[String] {
        match self {
            TriggerList::One(pattern) => std::slice::from_ref(pattern),
            TriggerList::Many(patterns) => patterns,
        }
    }
}

/// Plugin manifest as written on disk
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PluginManifest {
    /// Canonical command token, e.g. `/ping` (required)
    pub trigger_name: String,

    /// Patterns matched against message text (required)
    pub triggers: TriggerList,

    /// Help text (required)
    pub description: String,

    /// Key into the handler catalog (required)
    pub handler: String,
}

impl PluginManifest {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PluginError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PluginError::load(path, format!("Failed to read manifest: {}", e)))?;

        Self::from_str(&content).map_err(|reason| PluginError::load(path, reason))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, String> {
        serde_yaml::from_str(content).map_err(|e| format!("Failed to parse manifest: {}", e))
    }

    /// Validate the manifest and instantiate its handler
    pub fn into_descriptor(self, catalog: &HandlerCatalog) -> Result<PluginDescriptor, String> {
        let triggers = Triggers::compile(self.triggers.sources())?;
        let handler = catalog.create(&self.handler).map_err(|e| e.to_string())?;
        PluginDescriptor::new(self.trigger_name, triggers, self.description, handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_and_list_triggers() {
        let one = PluginManifest::from_str(
            "trigger-name: /ping\ntriggers: '/ping'\ndescription: Respond to a ping.\nhandler: ping\n",
        )
        .unwrap();
        assert_eq!(one.triggers.sources(), ["/ping".to_string()]);

        let many = PluginManifest::from_str(
            "trigger-name: /sendgrid\ntriggers: ['/sendgrid \\w', '/sendgrid']\ndescription: Stats.\nhandler: sendgrid\n",
        )
        .unwrap();
        assert_eq!(many.triggers.sources().len(), 2);
    }

    #[test]
    fn test_missing_field_rejected() {
        let err = PluginManifest::from_str("trigger-name: /ping\ntriggers: '/ping'\nhandler: ping\n").unwrap_err();
        assert!(err.contains("description"));
    }

    #[test]
    fn test_unknown_handler_rejected() {
        let manifest = PluginManifest::from_str(
            "trigger-name: /x\ntriggers: '/x'\ndescription: x\nhandler: missing\n",
        )
        .unwrap();
        let err = manifest.into_descriptor(&HandlerCatalog::with_builtins()).unwrap_err();
        assert!(err.contains("missing"));
    }

    #[test]
    fn test_empty_trigger_list_rejected() {
        let manifest = PluginManifest::from_str(
            "trigger-name: /x\ntriggers: []\ndescription: x\nhandler: ping\n",
        )
        .unwrap();
        assert!(manifest.into_descriptor(&HandlerCatalog::with_builtins()).is_err());
    }
}
