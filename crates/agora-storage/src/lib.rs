//! agora-storage - Storage backends for agora
//!
//! This crate provides the store implementations behind the core traits:
//! an in-memory store and a file system backed store with atomic snapshot
//! writes.

mod file_store;
mod memory;
mod state;

pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use state::CURRENT_SCHEMA_VERSION;
