//! Console adapter for local development
//!
//! Every stdin line becomes a text message from a console user; whatever the
//! bot says is printed to stdout.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use crate::application::errors::BotError;
use crate::domain::entities::{Message, Room, User};
use crate::domain::traits::ChatClient;

const BOT_ID: &str = "console-bot";
const USER_ID: &str = "console-user";

/// Console chat adapter
pub struct ConsoleAdapter {
    identity: User,
    room: Room,
    input: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsoleAdapter {
    pub fn new(bot_name: impl Into<String>) -> Self {
        Self {
            identity: User::new(BOT_ID).with_name(bot_name),
            room: Room::new("console", "console"),
            input: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new("smores")
    }
}

#[async_trait]
impl ChatClient for ConsoleAdapter {
    async fn me(&self) -> Result<User, BotError> {
        Ok(self.identity.clone())
    }

    async fn rooms(&self) -> Result<Vec<Room>, BotError> {
        Ok(vec![self.room.clone()])
    }

    async fn user(&self, id: &str) -> Result<User, BotError> {
        if id == self.identity.id {
            return Ok(self.identity.clone());
        }
        Ok(User::new(id).with_name("you"))
    }

    async fn join(&self, room: &Room) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode) in {}", room.name);
        Ok(())
    }

    async fn speak(&self, _room: &Room, text: &str) -> Result<(), BotError> {
        println!("[BOT] {}", text);
        Ok(())
    }

    async fn paste(&self, _room: &Room, text: &str) -> Result<(), BotError> {
        println!("[BOT]");
        for line in text.lines() {
            println!("    {}", line);
        }
        Ok(())
    }

    async fn next_message(&self, room: &Room) -> Result<Option<Message>, BotError> {
        let mut input = self.input.lock().await;
        let line = input
            .next_line()
            .await
            .map_err(|e| BotError::Chat(format!("Failed to read stdin: {}", e)))?;

        Ok(line.map(|text| Message::text(room.id.clone(), text.trim()).with_user(USER_ID)))
    }
}
