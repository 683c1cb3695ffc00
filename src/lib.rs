//! smores - a chat bot command framework
//!
//! Plugins are discovered on disk, bound to their configuration, and every
//! inbound text message is routed to each plugin whose trigger matches.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod plugins;

pub use application::errors::{BotError, CommandError, ConfigError, PluginError};
pub use application::messaging::{BotContext, MessageRouter};
pub use application::services::BotService;
pub use infrastructure::config::{Config, ConfigScope};
pub use infrastructure::plugins::{PluginLoader, PluginRegistry};
pub use plugins::{CommandHandler, HandlerCatalog, PluginDescriptor, Triggers};
