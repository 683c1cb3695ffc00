//! Chat client adapters

pub mod console;
pub mod memory;

pub use console::ConsoleAdapter;
pub use memory::MemoryAdapter;
