//! `/wall <text>` - broadcast to every other room

use serde_json::Value;
use crate::application::errors::CommandError;
use crate::application::messaging::BotContext;
use crate::domain::entities::{Message, Room};
use crate::plugins::trait_def::CommandHandler;

const COMMAND: &str = "/wall";

pub struct Wall;

impl CommandHandler for Wall {
    fn handle(
        &self,
        text: &str,
        message: &Message,
        room: &Room,
        ctx: &BotContext,
        _config: Option<&Value>,
    ) -> Result<(), CommandError> {
        let wall = wall_text(text)
            .ok_or_else(|| CommandError::InvalidArgs("usage: /wall <message>".to_string()))?
            .to_string();
        let author = message.user_id.clone();
        let origin = room.clone();
        let task_ctx = ctx.clone();

        let spawned = ctx.spawn(async move {
            let client = task_ctx.client();
            let who = match &author {
                Some(id) => match client.user(id).await {
                    Ok(user) => user.display_name(),
                    Err(e) => {
                        tracing::warn!("wall: failed to look up user {}: {}", id, e);
                        id.clone()
                    }
                },
                None => "unknown".to_string(),
            };

            let rooms = match client.rooms().await {
                Ok(rooms) => rooms,
                Err(e) => {
                    tracing::error!("wall: failed to list rooms: {}", e);
                    task_ctx.speak_error("could not list rooms for /wall", &origin);
                    return;
                }
            };

            for chatroom in rooms.iter().filter(|r| r.id != origin.id) {
                task_ctx.speak(format!("ALERT: {} (via {})", wall, who), chatroom);
            }
        });

        if spawned {
            Ok(())
        } else {
            Err(CommandError::ExecutionFailed("no runtime to broadcast on".to_string()))
        }
    }
}

/// Text following the `/wall` token, if any
pub fn wall_text(text: &str) -> Option<&str> {
    let (_, rest) = text.split_once(COMMAND)?;
    let rest = rest.trim();
    (!rest.is_empty()).then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_text() {
        assert_eq!(wall_text("/wall lunch is here"), Some("lunch is here"));
        assert_eq!(wall_text("/wall   "), None);
        assert_eq!(wall_text("nothing"), None);
    }
}
