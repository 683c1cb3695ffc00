//! Bot context - the shared state handed to every plugin handler

use std::future::Future;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use crate::domain::entities::{Room, User};
use crate::domain::traits::ChatClient;
use crate::infrastructure::config::ConfigScope;
use super::outbound::{Outbound, OutboundKind, OutboundSender};

/// Marker put in front of error replies
pub const ERROR_PREFIX: &str = "ERROR: ";

/// Everything a handler may touch: identity, settings and the room primitives.
///
/// Cheap to clone, so background work can carry its own copy.
#[derive(Clone)]
pub struct BotContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    identity: User,
    executed_on: DateTime<Utc>,
    config: Arc<ConfigScope>,
    client: Arc<dyn ChatClient>,
    outbound: OutboundSender,
}

impl BotContext {
    pub fn new(
        identity: User,
        client: Arc<dyn ChatClient>,
        config: Arc<ConfigScope>,
        outbound: OutboundSender,
    ) -> Self {
        Self::with_executed_on(identity, client, config, outbound, Utc::now())
    }

    pub fn with_executed_on(
        identity: User,
        client: Arc<dyn ChatClient>,
        config: Arc<ConfigScope>,
        outbound: OutboundSender,
        executed_on: DateTime<Utc>,
    ) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                identity,
                executed_on,
                config,
                client,
                outbound,
            }),
        }
    }

    /// The user the bot is connected as
    pub fn identity(&self) -> &User {
        &self.inner.identity
    }

    /// When the bot started
    pub fn executed_on(&self) -> DateTime<Utc> {
        self.inner.executed_on
    }

    pub fn config(&self) -> &ConfigScope {
        &self.inner.config
    }

    pub fn client(&self) -> Arc<dyn ChatClient> {
        Arc::clone(&self.inner.client)
    }

    pub fn speak(&self, text: impl Into<String>, room: &Room) {
        self.enqueue(text.into(), room, OutboundKind::Speak);
    }

    /// Post multi-line or preformatted output
    pub fn paste_block(&self, text: impl Into<String>, room: &Room) {
        self.enqueue(text.into(), room, OutboundKind::Paste);
    }

    pub fn speak_error(&self, text: impl AsRef<str>, room: &Room) {
        self.speak(format!("{}{}", ERROR_PREFIX, text.as_ref()), room);
    }

    /// Run background work without blocking the router.
    ///
    /// Returns false when there is no runtime to run it on.
    pub fn spawn<F>(&self, future: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(future);
                true
            }
            Err(e) => {
                tracing::warn!("No async runtime for background work: {}", e);
                false
            }
        }
    }

    fn enqueue(&self, text: String, room: &Room, kind: OutboundKind) {
        let out = Outbound {
            room: room.clone(),
            text,
            kind,
        };
        if self.inner.outbound.send(out).is_err() {
            tracing::warn!("[{}] Outbound queue closed, dropping message", room.id);
        }
    }
}

impl std::fmt::Debug for BotContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotContext")
            .field("identity", &self.inner.identity)
            .field("executed_on", &self.inner.executed_on)
            .finish()
    }
}
