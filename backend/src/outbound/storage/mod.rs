//! Key-value store adapters.

mod file;
mod memory;

pub use file::{FileKeyValueStore, FileStoreError};
pub use memory::InMemoryKeyValueStore;
