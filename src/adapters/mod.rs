// Adapters layer: concrete implementations of the domain ports.

pub mod file_store;
pub mod memory_store;
pub mod storage;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use storage::LocalStorage;
