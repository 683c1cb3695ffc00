//! Application layer errors

use std::path::PathBuf;
use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Plugin error: {0}")]
    Plugin(#[from] PluginError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Plugin loading and registration errors
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Failed to load plugin {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    #[error("Failed to parse config for plugin '{slug}': {reason}")]
    ConfigParse { slug: String, reason: String },

    #[error("Config for '{slug}' is already bound; ignoring {}", .path.display())]
    DuplicateConfig { slug: String, path: PathBuf },

    #[error("Trigger '{0}' is already registered")]
    DuplicateTrigger(String),

    #[error("Slug '{slug}' is already bound to trigger '{existing}'")]
    DuplicateSlug { slug: String, existing: String },

    #[error("Unknown handler '{0}'")]
    UnknownHandler(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PluginError {
    pub fn load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PluginError::Load {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Reserved key '{0}' must not be set in the top-level config")]
    ReservedKeyConflict(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
