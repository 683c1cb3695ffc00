//! In-memory adapter: scripted inbound messages, recorded outbound ones

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use async_trait::async_trait;
use crate::application::errors::BotError;
use crate::application::messaging::{Outbound, OutboundKind};
use crate::domain::entities::{Message, Room, User};
use crate::domain::traits::ChatClient;

/// Chat client that never touches the network
pub struct MemoryAdapter {
    identity: User,
    rooms: Vec<Room>,
    users: HashMap<String, User>,
    inbound: Mutex<VecDeque<Message>>,
    sent: Mutex<Vec<Outbound>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryAdapter {
    pub fn new(identity: User) -> Self {
        Self {
            identity,
            rooms: Vec::new(),
            users: HashMap::new(),
            inbound: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id.clone(), user);
        self
    }

    /// Queue a message for `next_message`
    pub fn push_message(&self, message: Message) {
        lock(&self.inbound).push_back(message);
    }

    /// Everything delivered so far
    pub fn sent(&self) -> Vec<Outbound> {
        lock(&self.sent).clone()
    }

    fn record(&self, room: &Room, text: &str, kind: OutboundKind) {
        lock(&self.sent).push(Outbound {
            room: room.clone(),
            text: text.to_string(),
            kind,
        });
    }
}

#[async_trait]
impl ChatClient for MemoryAdapter {
    async fn me(&self) -> Result<User, BotError> {
        Ok(self.identity.clone())
    }

    async fn rooms(&self) -> Result<Vec<Room>, BotError> {
        Ok(self.rooms.clone())
    }

    async fn user(&self, id: &str) -> Result<User, BotError> {
        self.users
            .get(id)
            .cloned()
            .ok_or_else(|| BotError::NotFound(format!("user '{}'", id)))
    }

    async fn join(&self, room: &Room) -> Result<(), BotError> {
        if self.rooms.iter().any(|r| r.id == room.id) {
            Ok(())
        } else {
            Err(BotError::NotFound(format!("room '{}'", room.id)))
        }
    }

    async fn speak(&self, room: &Room, text: &str) -> Result<(), BotError> {
        self.record(room, text, OutboundKind::Speak);
        Ok(())
    }

    async fn paste(&self, room: &Room, text: &str) -> Result<(), BotError> {
        self.record(room, text, OutboundKind::Paste);
        Ok(())
    }

    async fn next_message(&self, _room: &Room) -> Result<Option<Message>, BotError> {
        Ok(lock(&self.inbound).pop_front())
    }
}
