//! Synchronous key-value persistence for the task collection.
//!
//! [`KeyValueStore`] abstracts the per-user store (one string value per
//! key). [`TaskStore`] sits on top of it and mirrors the whole task
//! collection under a single well-known key.

pub mod file;
pub mod memory;
pub mod task_store;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use task_store::{DEFAULT_STORAGE_KEY, TaskStore};

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A read operation failed.
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// A write operation failed.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// The write would exceed the store's capacity.
    #[error("quota exceeded: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        /// Total bytes the store would hold after the write.
        needed: usize,
        /// Configured capacity in bytes.
        limit: usize,
    },

    /// The key cannot be used with this backend.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

/// A synchronous string key-value store.
///
/// Implementations:
/// - [`MemoryStorage`]: in-process map with an optional quota
/// - [`FileStorage`]: one file per key in a data directory
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
