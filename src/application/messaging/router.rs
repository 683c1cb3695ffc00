//! Message router - Hands each inbound message to every matching plugin

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use crate::domain::entities::{Message, Room};
use crate::infrastructure::plugins::PluginRegistry;
use super::context::BotContext;

/// Routes messages to plugins in registration order
pub struct MessageRouter {
    registry: Arc<PluginRegistry>,
}

impl MessageRouter {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Route one inbound message. Returns the trigger names that were invoked.
    ///
    /// Every matching plugin runs, in order, even if an earlier one fails.
    /// Background work a handler spawns is not awaited.
    pub fn route(&self, message: &Message, room: &Room, ctx: &BotContext) -> Vec<String> {
        if !message.message_type.is_text() {
            tracing::trace!("[{}] Ignoring {} message", room.id, message.message_type.as_str());
            return Vec::new();
        }

        if message.user_id.as_deref() == Some(ctx.identity().id.as_str()) {
            tracing::trace!("[{}] Ignoring own message", room.id);
            return Vec::new();
        }

        let text = message.body_text();
        let snapshot = self.registry.list();
        let mut invoked = Vec::new();

        for descriptor in snapshot.iter().filter(|d| d.matches(text)) {
            let trigger = descriptor.trigger_name();
            tracing::info!("matched: {}", trigger);

            let config = snapshot
                .slug_for(trigger)
                .and_then(|slug| ctx.config().plugin_config(slug).cloned());

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                descriptor.handle(text, message, room, ctx, config.as_ref())
            }));

            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!("[{}] Plugin '{}' failed: {}", room.id, trigger, e),
                Err(payload) => tracing::error!(
                    "[{}] Plugin '{}' panicked: {}",
                    room.id,
                    trigger,
                    panic_message(payload.as_ref())
                ),
            }
            invoked.push(trigger.to_string());
        }

        invoked
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
