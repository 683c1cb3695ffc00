//! Outbound queue - decouples handlers from the async chat client

use std::sync::Arc;
use tokio::sync::mpsc;
use crate::domain::entities::Room;
use crate::domain::traits::ChatClient;

/// How a queued line should be posted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundKind {
    Speak,
    Paste,
}

/// A message waiting to be delivered to a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub room: Room,
    pub text: String,
    pub kind: OutboundKind,
}

pub type OutboundSender = mpsc::UnboundedSender<Outbound>;
pub type OutboundReceiver = mpsc::UnboundedReceiver<Outbound>;

pub fn outbound_channel() -> (OutboundSender, OutboundReceiver) {
    mpsc::unbounded_channel()
}

/// Drain the queue into the chat client until every sender is dropped
pub async fn deliver(client: Arc<dyn ChatClient>, mut rx: OutboundReceiver) {
    while let Some(out) = rx.recv().await {
        let result = match out.kind {
            OutboundKind::Speak => client.speak(&out.room, &out.text).await,
            OutboundKind::Paste => client.paste(&out.room, &out.text).await,
        };

        match result {
            Ok(()) => tracing::info!("message: {}", out.text),
            Err(e) => tracing::warn!("[{}] Failed to deliver message: {}", out.room.id, e),
        }
    }
    tracing::debug!("Outbound queue closed");
}
