//! Process-wide configuration scope: user settings plus per-plugin documents

use std::collections::HashMap;
use serde_json::Value;
use super::{Config, RESERVED_PLUGIN_KEY};
use crate::application::errors::ConfigError;

/// Settings shared by every handler, plus plugin configuration keyed by slug.
///
/// Written only while plugins load; frozen behind an `Arc` afterwards.
#[derive(Debug, Clone, Default)]
pub struct ConfigScope {
    settings: Config,
    plugin_configs: HashMap<String, Value>,
}

impl ConfigScope {
    /// Fails when the settings already use the reserved plugin namespace
    pub fn new(settings: Config) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            settings,
            plugin_configs: HashMap::new(),
        })
    }

    pub fn settings(&self) -> &Config {
        &self.settings
    }

    /// Store a parsed plugin document, replacing any previous one for the slug
    pub fn insert_plugin_config(&mut self, slug: impl Into<String>, value: Value) -> Option<Value> {
        self.plugin_configs.insert(slug.into(), value)
    }

    pub fn plugin_config(&self, slug: &str) -> Option<&Value> {
        self.plugin_configs.get(slug)
    }

    /// The whole scope as one document, with plugin configs under the reserved key
    pub fn to_value(&self) -> Value {
        let mut root = self.settings.extra.clone();
        let plugins: serde_json::Map<String, Value> = self
            .plugin_configs
            .iter()
            .map(|(slug, value)| (slug.clone(), value.clone()))
            .collect();
        root.insert(RESERVED_PLUGIN_KEY.to_string(), Value::Object(plugins));
        Value::Object(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_rejects_reserved_key() {
        let mut settings = Config::default();
        settings.extra.insert(RESERVED_PLUGIN_KEY.to_string(), json!({}));
        assert!(matches!(
            ConfigScope::new(settings),
            Err(ConfigError::ReservedKeyConflict(_))
        ));
    }

    #[test]
    fn test_plugin_configs_are_keyed_by_slug() {
        let mut scope = ConfigScope::new(Config::default()).unwrap();
        scope.insert_plugin_config("sendgrid", json!({"login": "L"}));

        assert_eq!(scope.plugin_config("sendgrid"), Some(&json!({"login": "L"})));
        assert_eq!(scope.plugin_config("ping"), None);
        assert_eq!(scope.to_value()[RESERVED_PLUGIN_KEY]["sendgrid"]["login"], "L");
    }
}
