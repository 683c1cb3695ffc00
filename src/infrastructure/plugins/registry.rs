//! Plugin registry - Manages active command plugins

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use crate::application::errors::PluginError;
use crate::plugins::PluginDescriptor;

/// Registry for active plugins, in registration order
pub struct PluginRegistry {
    state: RwLock<RegistryState>,
}

#[derive(Default)]
struct RegistryState {
    /// Shared with snapshots; copied on write
    handlers: Arc<Vec<Arc<PluginDescriptor>>>,
    slug_to_trigger: HashMap<String, String>,
    /// Shared with snapshots; copied on write
    trigger_to_slug: Arc<HashMap<String, String>>,
}

/// Read-only view of the registry at one point in time.
///
/// Iterating it never observes later registrations or removals.
#[derive(Clone, Default)]
pub struct RegistrySnapshot {
    handlers: Arc<Vec<Arc<PluginDescriptor>>>,
    trigger_to_slug: Arc<HashMap<String, String>>,
}

impl RegistrySnapshot {
    pub fn iter(&self) -> impl Iterator<Item = &Arc<PluginDescriptor>> + '_ {
        self.handlers.iter()
    }

    /// Slug the plugin was registered under when the snapshot was taken
    pub fn slug_for(&self, trigger_name: &str) -> Option<&str> {
        self.trigger_to_slug.get(trigger_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<'a> IntoIterator for &'a RegistrySnapshot {
    type Item = &'a Arc<PluginDescriptor>;
    type IntoIter = std::slice::Iter<'a, Arc<PluginDescriptor>>;

    fn into_iter(self) -> Self::IntoIter {
        self.handlers.iter()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a plugin under its on-disk slug
    pub fn register(&self, descriptor: PluginDescriptor, slug: impl Into<String>) -> Result<(), PluginError> {
        let slug = slug.into();
        let trigger = descriptor.trigger_name().to_string();
        let mut state = self.write();

        if state.trigger_to_slug.contains_key(&trigger) {
            return Err(PluginError::DuplicateTrigger(trigger));
        }

        if let Some(existing) = state.slug_to_trigger.get(&slug) {
            return Err(PluginError::DuplicateSlug {
                slug,
                existing: existing.clone(),
            });
        }

        Arc::make_mut(&mut state.handlers).push(Arc::new(descriptor));
        state.slug_to_trigger.insert(slug.clone(), trigger.clone());
        Arc::make_mut(&mut state.trigger_to_slug).insert(trigger.clone(), slug.clone());

        tracing::info!("Registered plugin: {} (slug: {})", trigger, slug);
        Ok(())
    }

    /// Remove a plugin and its slug mapping. Returns whether anything was removed.
    pub fn unregister(&self, trigger_name: &str) -> bool {
        let mut state = self.write();

        let Some(position) = state
            .handlers
            .iter()
            .position(|h| h.trigger_name() == trigger_name)
        else {
            return false;
        };

        Arc::make_mut(&mut state.handlers).remove(position);
        if let Some(slug) = Arc::make_mut(&mut state.trigger_to_slug).remove(trigger_name) {
            state.slug_to_trigger.remove(&slug);
        }

        tracing::info!("Unregistered plugin: {}", trigger_name);
        true
    }

    /// Active plugins in registration order
    pub fn list(&self) -> RegistrySnapshot {
        let state = self.read();
        RegistrySnapshot {
            handlers: Arc::clone(&state.handlers),
            trigger_to_slug: Arc::clone(&state.trigger_to_slug),
        }
    }

    /// Get a plugin by trigger name
    pub fn get(&self, trigger_name: &str) -> Option<Arc<PluginDescriptor>> {
        self.read()
            .handlers
            .iter()
            .find(|h| h.trigger_name() == trigger_name)
            .cloned()
    }

    pub fn slug_for(&self, trigger_name: &str) -> Option<String> {
        self.read().trigger_to_slug.get(trigger_name).cloned()
    }

    pub fn trigger_for(&self, slug: &str) -> Option<String> {
        self.read().slug_to_trigger.get(slug).cloned()
    }

    /// Get the number of active plugins
    pub fn len(&self) -> usize {
        self.read().handlers.len()
    }

    /// Check if no plugins are active
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
