//! Token storage adapters.

mod memory_storage;

pub use memory_storage::InMemoryTokenStorage;
