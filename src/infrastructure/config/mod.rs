//! Configuration management

pub mod scope;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

pub use scope::ConfigScope;

/// Top-level key under which per-plugin configuration lives at runtime.
/// Users may not set it themselves.
pub const RESERVED_PLUGIN_KEY: &str = "plugin-config";

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub plugins: PluginConfig,
    /// Free-form user settings, readable by plugins through the bot context
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    /// Room to join, by id or name
    pub room: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ChatConfig {
    pub account: Option<String>,
    pub token: Option<String>,
    pub ssl: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PluginConfig {
    pub directory: PathBuf,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "smores".to_string(),
            room: None,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            account: None,
            token: None,
            ssl: true,
        }
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./plugins"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            chat: ChatConfig::default(),
            plugins: PluginConfig::default(),
            extra: serde_json::Map::new(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config {}: {}", path.display(), e)))?;

        Self::from_yaml_str(&content)
    }

    /// Parse a settings document and reject it if it claims the reserved plugin key
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extra.contains_key(RESERVED_PLUGIN_KEY) {
            return Err(ConfigError::ReservedKeyConflict(RESERVED_PLUGIN_KEY.to_string()));
        }
        if self.bot.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue("bot.name must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Environment variables override file values
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("SMORES_TOKEN") {
            self.chat.token = Some(token);
        }

        if let Ok(room) = std::env::var("SMORES_ROOM") {
            self.bot.room = Some(room);
        }

        if let Ok(dir) = std::env::var("SMORES_PLUGINS_DIR") {
            self.plugins.directory = PathBuf::from(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = Config::from_yaml_str("bot:\n  name: campbot\n").unwrap();
        assert_eq!(config.bot.name, "campbot");
        assert!(config.chat.ssl);
        assert_eq!(config.plugins.directory, PathBuf::from("./plugins"));
    }

    #[test]
    fn test_extra_keys_are_kept() {
        let config = Config::from_yaml_str("greeting: hello\nbot:\n  name: campbot\n").unwrap();
        assert_eq!(config.extra.get("greeting"), Some(&serde_json::json!("hello")));
    }

    #[test]
    fn test_reserved_key_is_rejected() {
        let err = Config::from_yaml_str("plugin-config:\n  ping: {}\n").unwrap_err();
        assert!(matches!(err, ConfigError::ReservedKeyConflict(ref key) if key == RESERVED_PLUGIN_KEY));
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let err = Config::from_yaml_str("bot: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_default_round_trips_through_yaml() {
        let yaml = Config::default().to_yaml().unwrap();
        let config = Config::from_yaml_str(&yaml).unwrap();
        assert_eq!(config.bot.name, "smores");
    }
}
