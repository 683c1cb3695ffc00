//! Domain entities - Core chat objects with no external dependencies

pub mod user;
pub mod message;
pub mod room;

pub use user::User;
pub use message::{Message, MessageType};
pub use room::Room;
