use std::fmt;

/// A chat room the bot can listen to and speak into
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Room {
    pub id: String,
    pub name: String,
}

impl Room {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// True when `key` is either the room id or its name
    pub fn matches(&self, key: &str) -> bool {
        self.id == key || self.name.eq_ignore_ascii_case(key)
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
