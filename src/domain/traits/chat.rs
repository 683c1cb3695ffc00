use async_trait::async_trait;
use crate::domain::entities::{Message, Room, User};
use crate::application::errors::BotError;

/// Chat client trait - abstraction for the chat service the bot connects to
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Who the bot is connected as
    async fn me(&self) -> Result<User, BotError>;

    /// All rooms visible to the bot
    async fn rooms(&self) -> Result<Vec<Room>, BotError>;

    /// Look up a user by id
    async fn user(&self, id: &str) -> Result<User, BotError>;

    /// Join a room before listening to it
    async fn join(&self, room: &Room) -> Result<(), BotError>;

    /// Say a single line of text in a room
    async fn speak(&self, room: &Room, text: &str) -> Result<(), BotError>;

    /// Post preformatted, possibly multi-line text in a room
    async fn paste(&self, room: &Room, text: &str) -> Result<(), BotError>;

    /// Wait for the next event in a room. `None` means the stream ended.
    async fn next_message(&self, room: &Room) -> Result<Option<Message>, BotError>;
}
