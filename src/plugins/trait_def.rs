//! Plugin trait definitions

use std::fmt;
use std::sync::Arc;
use regex_lite::Regex;
use serde_json::Value;
use crate::application::errors::CommandError;
use crate::application::messaging::BotContext;
use crate::domain::entities::{Message, Room};

/// Core handler trait that every command plugin implements
pub trait CommandHandler: Send + Sync {
    /// React to a matching message. `config` is the plugin's bound document, if any.
    fn handle(
        &self,
        text: &str,
        message: &Message,
        room: &Room,
        ctx: &BotContext,
        config: Option<&Value>,
    ) -> Result<(), CommandError>;
}

impl<F> CommandHandler for F
where
    F: Fn(&str, &Message, &Room, &BotContext, Option<&Value>) -> Result<(), CommandError> + Send + Sync,
{
    fn handle(
        &self,
        text: &str,
        message: &Message,
        room: &Room,
        ctx: &BotContext,
        config: Option<&Value>,
    ) -> Result<(), CommandError> {
        self(text, message, room, ctx, config)
    }
}

/// Non-empty ordered list of patterns; a text matches if any pattern does
#[derive(Debug, Clone)]
pub struct Triggers {
    patterns: Vec<Regex>,
}

impl Triggers {
    pub fn new(patterns: Vec<Regex>) -> Result<Self, String> {
        if patterns.is_empty() {
            return Err("trigger list must not be empty".to_string());
        }
        Ok(Self { patterns })
    }

    /// Compile every source pattern, failing on the first invalid one
    pub fn compile<S: AsRef<str>>(sources: &[S]) -> Result<Self, String> {
        let patterns = sources
            .iter()
            .map(|s| {
                Regex::new(s.as_ref())
                    .map_err(|e| format!("invalid trigger pattern '{}': {}", s.as_ref(), e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(patterns)
    }

    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }
}

/// One loaded command: immutable once built, replaced wholesale on reload
#[derive(Clone)]
pub struct PluginDescriptor {
    trigger_name: String,
    triggers: Triggers,
    description: String,
    handler: Arc<dyn CommandHandler>,
}

impl PluginDescriptor {
    pub fn new(
        trigger_name: impl Into<String>,
        triggers: Triggers,
        description: impl Into<String>,
        handler: Arc<dyn CommandHandler>,
    ) -> Result<Self, String> {
        let trigger_name = trigger_name.into();
        if trigger_name.trim().is_empty() {
            return Err("trigger name must not be empty".to_string());
        }
        Ok(Self {
            trigger_name,
            triggers,
            description: description.into(),
            handler,
        })
    }

    pub fn trigger_name(&self) -> &str {
        &self.trigger_name
    }

    pub fn triggers(&self) -> &Triggers {
        &self.triggers
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn matches(&self, text: &str) -> bool {
        self.triggers.matches(text)
    }

    pub fn handle(
        &self,
        text: &str,
        message: &Message,
        room: &Room,
        ctx: &BotContext,
        config: Option<&Value>,
    ) -> Result<(), CommandError> {
        self.handler.handle(text, message, room, ctx, config)
    }
}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("trigger_name", &self.trigger_name)
            .field("triggers", &self.triggers.patterns().collect::<Vec<_>>())
            .field("description", &self.description)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Arc<dyn CommandHandler> {
        Arc::new(
            |_: &str, _: &Message, _: &Room, _: &BotContext, _: Option<&Value>| -> Result<(), CommandError> {
                Ok(())
            },
        )
    }

    #[test]
    fn test_single_pattern_matches() {
        let triggers = Triggers::compile(&["/ping"]).unwrap();
        assert!(triggers.matches("/ping"));
        assert!(triggers.matches("hey /ping there"));
        assert!(!triggers.matches("ping"));
    }

    #[test]
    fn test_any_pattern_matches() {
        let triggers = Triggers::compile(&[r"/sendgrid \w", "^help$"]).unwrap();
        // First pattern only
        assert!(triggers.matches("/sendgrid accountA"));
        // Last pattern only
        assert!(triggers.matches("help"));
        assert!(!triggers.matches("/sendgrid"));
    }

    #[test]
    fn test_empty_trigger_list_rejected() {
        let empty: [&str; 0] = [];
        assert!(Triggers::compile(&empty).is_err());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = Triggers::compile(&["(unclosed"]).unwrap_err();
        assert!(err.contains("(unclosed"));
    }

    #[test]
    fn test_blank_trigger_name_rejected() {
        let triggers = Triggers::compile(&["/x"]).unwrap();
        assert!(PluginDescriptor::new("  ", triggers, "x", noop()).is_err());
    }
}
