//! Message handling - Routing inbound messages and delivering replies

pub mod context;
pub mod outbound;
pub mod router;

pub use context::{BotContext, ERROR_PREFIX};
pub use outbound::{deliver, outbound_channel, Outbound, OutboundKind, OutboundReceiver, OutboundSender};
pub use router::MessageRouter;
