//! `/ping` - answers with pong

use serde_json::Value;
use crate::application::errors::CommandError;
use crate::application::messaging::BotContext;
use crate::domain::entities::{Message, Room};
use crate::plugins::trait_def::CommandHandler;

pub struct Ping;

impl CommandHandler for Ping {
    fn handle(
        &self,
        _text: &str,
        _message: &Message,
        room: &Room,
        ctx: &BotContext,
        _config: Option<&Value>,
    ) -> Result<(), CommandError> {
        ctx.speak("pong", room);
        Ok(())
    }
}
