//! Command plugins for smores
//! 
//! A plugin pairs a trigger (one or more patterns) with a handler. Handlers
//! are compiled in and looked up through the [`HandlerCatalog`]; which ones
//! are active, and on which triggers, is decided by manifests on disk.

pub mod builtin;
pub mod catalog;
pub mod trait_def;

pub use catalog::HandlerCatalog;
pub use trait_def::{CommandHandler, PluginDescriptor, Triggers};
