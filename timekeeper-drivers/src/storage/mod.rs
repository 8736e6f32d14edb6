//! Settings storage implementations

pub mod memory;

pub use memory::MemoryStorage;
