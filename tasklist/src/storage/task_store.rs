//! Persistent mirror of the task collection.
//!
//! The whole collection lives under one key as a JSON array. Loading never
//! fails: a missing, unreadable or malformed value yields an empty
//! collection. Saving always replaces the whole value.

use std::collections::HashSet;

use tasklist_proto::Task;
use tasklist_proto::codec::{decode_tasks, encode_tasks};

use super::{KeyValueStore, StoreError};

/// Key the collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// Reads and writes the task collection through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct TaskStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Creates an adapter using [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Creates an adapter storing the collection under `key`.
    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Loads the stored collection.
    ///
    /// Returns an empty collection if nothing is stored, the store cannot be
    /// read, or the value is not a valid task array. Records repeating an
    /// earlier id are dropped.
    #[must_use]
    pub fn load(&self) -> Vec<Task> {
        let text = match self.storage.get(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored tasks, starting empty");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read stored tasks, starting empty");
                return Vec::new();
            }
        };

        let tasks = match decode_tasks(&text) {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "stored tasks are malformed, starting empty");
                return Vec::new();
            }
        };

        let mut seen = HashSet::with_capacity(tasks.len());
        let tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|task| {
                let first = seen.insert(task.id.clone());
                if !first {
                    tracing::warn!(task_id = %task.id, "dropping stored task with duplicate id");
                }
                first
            })
            .collect();

        tracing::info!(key = %self.key, count = tasks.len(), "loaded tasks");
        tasks
    }

    /// Replaces the stored collection with `tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be encoded or the
    /// store rejects the write.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let text = encode_tasks(tasks).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        self.storage.set(&self.key, &text)?;
        tracing::trace!(key = %self.key, count = tasks.len(), bytes = text.len(), "saved tasks");
        Ok(())
    }
}
