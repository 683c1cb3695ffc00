//! Built-in command handlers

pub mod ping;
pub mod sendgrid;
pub mod uptime;
pub mod wall;

pub use ping::Ping;
pub use sendgrid::SendGrid;
pub use uptime::{format_uptime, Uptime};
pub use wall::Wall;
