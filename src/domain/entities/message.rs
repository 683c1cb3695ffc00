use chrono::{DateTime, Utc};

/// Type of an inbound room event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageType {
    Text,
    Paste,
    Enter,
    Leave,
    Timestamp,
    Other(String),
}

impl MessageType {
    pub fn as_str(&self) -> &str {
        match self {
            MessageType::Text => "text",
            MessageType::Paste => "paste",
            MessageType::Enter => "enter",
            MessageType::Leave => "leave",
            MessageType::Timestamp => "timestamp",
            MessageType::Other(s) => s,
        }
    }

    /// Only plain text messages are routed to plugins
    pub fn is_text(&self) -> bool {
        matches!(self, MessageType::Text)
    }
}

/// Represents an inbound chat message
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub room_id: String,
    pub user_id: Option<String>,
    pub body: Option<String>,
    pub message_type: MessageType,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(room_id: impl Into<String>, message_type: MessageType) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            room_id: room_id.into(),
            user_id: None,
            body: None,
            message_type,
            timestamp: Utc::now(),
        }
    }

    pub fn text(room_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(room_id, MessageType::Text).with_body(body)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}
