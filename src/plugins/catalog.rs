//! Handler catalog - compile-time table of handler implementations
//!
//! Plugin manifests on disk name a handler key; the catalog turns that key
//! into a fresh handler instance.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use crate::application::errors::PluginError;
use super::builtin;
use super::trait_def::CommandHandler;

type HandlerFactory = Arc<dyn Fn() -> Arc<dyn CommandHandler> + Send + Sync>;

/// Maps handler keys to factories
#[derive(Clone, Default)]
pub struct HandlerCatalog {
    factories: HashMap<String, HandlerFactory>,
}

impl HandlerCatalog {
    /// An empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the handlers shipped in this crate
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        catalog.insert("ping", || Arc::new(builtin::Ping));
        catalog.insert("uptime", || Arc::new(builtin::Uptime));
        catalog.insert("wall", || Arc::new(builtin::Wall));
        catalog.insert("sendgrid", || Arc::new(builtin::SendGrid::new()));
        catalog
    }

    fn insert<F>(&mut self, key: &str, factory: F)
    where
        F: Fn() -> Arc<dyn CommandHandler> + Send + Sync + 'static,
    {
        self.factories.insert(key.to_string(), Arc::new(factory));
    }

    /// Add a handler implementation under `key`
    pub fn register<F>(&mut self, key: impl Into<String>, factory: F) -> Result<(), PluginError>
    where
        F: Fn() -> Arc<dyn CommandHandler> + Send + Sync + 'static,
    {
        let key = key.into();

        if self.factories.contains_key(&key) {
            return Err(PluginError::Internal(format!("Handler '{}' already registered", key)));
        }

        info!("Registering handler: {}", key);
        self.factories.insert(key, Arc::new(factory));
        Ok(())
    }

    /// Build a new instance of the handler named `key`
    pub fn create(&self, key: &str) -> Result<Arc<dyn CommandHandler>, PluginError> {
        self.factories
            .get(key)
            .map(|factory| factory())
            .ok_or_else(|| PluginError::UnknownHandler(key.to_string()))
    }

    /// Check if a handler exists
    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    /// Handler keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_present() {
        let catalog = HandlerCatalog::with_builtins();
        assert_eq!(catalog.keys(), vec!["ping", "sendgrid", "uptime", "wall"]);
        assert!(catalog.create("ping").is_ok());
    }

    #[test]
    fn test_unknown_handler() {
        let catalog = HandlerCatalog::new();
        assert!(matches!(catalog.create("nope"), Err(PluginError::UnknownHandler(k)) if k == "nope"));
    }

    #[test]
    fn test_duplicate_handler_key_rejected() {
        let mut catalog = HandlerCatalog::with_builtins();
        assert!(catalog.register("ping", || Arc::new(builtin::Ping)).is_err());
        assert!(catalog.register("pong", || Arc::new(builtin::Ping)).is_ok());
        assert!(catalog.contains("pong"));
    }
}
