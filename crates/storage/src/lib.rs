#![forbid(unsafe_code)]

pub mod memory;
pub mod repository;
pub mod sqlite;

pub use memory::InMemoryContentStore;
pub use repository::{ContentStore, ContentTransaction, Storage, StorageError};
