//! In-memory key-value store.
//!
//! Clones share the same underlying map and quota, so a test can hand one
//! handle to a [`TaskStore`](super::TaskStore) and inspect or constrain it
//! through another.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{KeyValueStore, StoreError};

/// In-memory [`KeyValueStore`] with an optional byte quota.
///
/// The quota bounds the total length of all stored values. A write that
/// would exceed it fails with [`StoreError::QuotaExceeded`] and leaves the
/// previous value in place.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Creates an empty store without a quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that holds at most `quota` bytes of values.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        let store = Self::default();
        store.set_quota(Some(quota));
        store
    }

    /// Changes the quota for every handle. `None` removes the limit.
    pub fn set_quota(&self, quota: Option<usize>) {
        self.inner.lock().quota = quota;
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.lock().entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        if let Some(limit) = inner.quota {
            let others: usize = inner
                .entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            let needed = others + value.len();
            if needed > limit {
                return Err(StoreError::QuotaExceeded { needed, limit });
            }
        }
        inner.entries.insert(key.to_string(), value.to_string());
        drop(inner);
        Ok(())
    }
}
