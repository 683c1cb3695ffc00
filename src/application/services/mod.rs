//! Application services - Startup and the listen loop

pub mod bot_service;

pub use bot_service::BotService;
