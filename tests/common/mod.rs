//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use smores::application::errors::CommandError;
use smores::application::messaging::{outbound_channel, BotContext, Outbound, OutboundReceiver};
use smores::domain::entities::{Message, Room, User};
use smores::infrastructure::adapters::MemoryAdapter;
use smores::infrastructure::config::{Config, ConfigScope};
use smores::plugins::CommandHandler;

pub const BOT_ID: &str = "bot";
pub const USER_ID: &str = "alice";

pub fn room() -> Room {
    Room::new("1", "general")
}

pub fn text_from(user: &str, body: &str) -> Message {
    Message::text("1", body).with_user(user)
}

pub fn context(scope: ConfigScope) -> (BotContext, OutboundReceiver) {
    let (tx, rx) = outbound_channel();
    let bot = User::new(BOT_ID).with_name("smores");
    let client = Arc::new(MemoryAdapter::new(bot.clone()).with_room(room()));
    (BotContext::new(bot, client, Arc::new(scope), tx), rx)
}

pub fn empty_scope() -> ConfigScope {
    ConfigScope::new(Config::default()).unwrap()
}

/// Everything queued so far, without waiting
pub fn drain(rx: &mut OutboundReceiver) -> Vec<Outbound> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

/// One recorded handler invocation
#[derive(Debug, Clone)]
pub struct Call {
    pub handler: String,
    pub text: String,
    pub config: Option<Value>,
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

/// Handler that records each call into `log` under `name`
pub fn recorder(name: &str, log: &CallLog) -> Arc<dyn CommandHandler> {
    let name = name.to_string();
    let log = Arc::clone(log);
    Arc::new(
        move |text: &str, _: &Message, _: &Room, _: &BotContext, config: Option<&Value>| -> Result<(), CommandError> {
            log.lock().unwrap().push(Call {
                handler: name.clone(),
                text: text.to_string(),
                config: config.cloned(),
            });
            Ok(())
        },
    )
}

pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

pub fn manifest(trigger: &str, pattern: &str, handler: &str) -> String {
    format!(
        "trigger-name: {trigger}\ntriggers: '{pattern}'\ndescription: test plugin\nhandler: {handler}\n"
    )
}
