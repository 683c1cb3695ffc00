//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Startup and the listen loop
//! - Errors: Domain-specific errors
//! - Messaging: Bot context, routing, outbound delivery

pub mod errors;
pub mod services;
pub mod messaging;
