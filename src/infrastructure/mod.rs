//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Settings and the plugin configuration scope
//! - Plugins: Discovery, binding and registration
//! - Adapters: Chat client implementations (console, in-memory)

pub mod config;
pub mod plugins;
pub mod adapters;
