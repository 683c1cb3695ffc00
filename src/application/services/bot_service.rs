//! Bot service - startup and the per-room listen loop

use std::sync::Arc;
use crate::application::errors::BotError;
use crate::application::messaging::{deliver, outbound_channel, BotContext, MessageRouter};
use crate::domain::entities::Room;
use crate::domain::traits::ChatClient;
use crate::infrastructure::config::{Config, ConfigScope};
use crate::infrastructure::plugins::{LoadReport, PluginLoader, PluginRegistry};
use crate::plugins::HandlerCatalog;

/// A loaded bot: plugins registered, context built, ready to listen
pub struct BotService {
    client: Arc<dyn ChatClient>,
    router: MessageRouter,
    ctx: BotContext,
    report: LoadReport,
}

impl BotService {
    /// Validate settings, load plugins and start the outbound delivery task.
    ///
    /// Fails before touching the plugin directory if the settings claim the
    /// reserved plugin namespace.
    pub async fn start(
        config: Config,
        client: Arc<dyn ChatClient>,
        catalog: HandlerCatalog,
    ) -> Result<Self, BotError> {
        let mut scope = ConfigScope::new(config)?;

        let registry = Arc::new(PluginRegistry::new());
        let loader = PluginLoader::new(scope.settings().plugins.directory.clone(), catalog);
        let report = loader.load_all(&registry, &mut scope);

        // Check out who we're running as so we don't answer ourselves
        let identity = client.me().await?;
        tracing::info!("Connected as {}", identity);

        let (tx, rx) = outbound_channel();
        tokio::spawn(deliver(Arc::clone(&client), rx));

        let ctx = BotContext::new(identity, Arc::clone(&client), Arc::new(scope), tx);

        Ok(Self {
            client,
            router: MessageRouter::new(registry),
            ctx,
            report,
        })
    }

    pub fn context(&self) -> &BotContext {
        &self.ctx
    }

    pub fn router(&self) -> &MessageRouter {
        &self.router
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Find a room by id or name
    pub async fn find_room(&self, key: &str) -> Result<Room, BotError> {
        self.client
            .rooms()
            .await?
            .into_iter()
            .find(|r| r.matches(key))
            .ok_or_else(|| BotError::NotFound(format!("room '{}'", key)))
    }

    /// Join `room` and route its messages until the stream ends
    pub async fn listen(&self, room: &Room) -> Result<(), BotError> {
        self.client.join(room).await?;
        tracing::info!("Listening in {}", room);

        while let Some(message) = self.client.next_message(room).await? {
            self.router.route(&message, room, &self.ctx);
        }

        tracing::info!("Stream for {} ended", room);
        Ok(())
    }
}
