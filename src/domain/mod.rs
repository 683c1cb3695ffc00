//! Domain layer - Core chat objects and the abstractions around them
//! 
//! This layer contains:
//! - Entities: Users, rooms and messages
//! - Traits: The chat client abstraction

pub mod entities;
pub mod traits;
