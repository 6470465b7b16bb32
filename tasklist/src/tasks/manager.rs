//! Task manager for the single-user task collection.
//!
//! `TaskManager` provides the application-layer interface for creating,
//! completing, deleting and re-prioritizing tasks. Every mutation is
//! applied in memory first and then written through the [`TaskStore`].
//! A failed write is logged and remembered; it never undoes or blocks the
//! in-memory change.

use chrono::{DateTime, Utc};
use tasklist_proto::{Priority, SortOrder, Task, TaskId};

use super::TaskError;
use super::view::filter_and_sort;
use crate::storage::{KeyValueStore, TaskStore};

/// Source of creation timestamps.
type Clock = Box<dyn Fn() -> DateTime<Utc>>;

/// Owns the task collection and keeps its persisted mirror current.
pub struct TaskManager<S> {
    /// Tasks in insertion order.
    tasks: Vec<Task>,
    store: TaskStore<S>,
    clock: Clock,
    /// Nesting depth of [`batch`](Self::batch) calls.
    batch_depth: usize,
    /// A mutation inside the current batch still needs a save.
    batch_pending: bool,
    /// The last save attempt failed.
    dirty: bool,
}

impl<S: KeyValueStore> TaskManager<S> {
    /// Opens the manager, seeding the collection from `store`.
    #[must_use]
    pub fn open(store: TaskStore<S>) -> Self {
        let tasks = store.load();
        Self {
            tasks,
            store,
            clock: Box::new(Utc::now),
            batch_depth: 0,
            batch_pending: false,
            dirty: false,
        }
    }

    /// Replaces the clock used to stamp new tasks.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Creates a task and appends it to the collection.
    ///
    /// The title is trimmed before it is stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TitleEmpty`] if the title is empty after
    /// trimming. The collection is left untouched in that case.
    pub fn add(&mut self, title: &str, priority: Priority) -> Result<Task, TaskError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskError::TitleEmpty);
        }

        let task = Task::new(title, priority, (self.clock)());
        tracing::debug!(task_id = %task.id, %priority, "task added");
        self.tasks.push(task.clone());
        self.persist();
        Ok(task)
    }

    /// Removes the task with the given id.
    ///
    /// Returns `false` without persisting if no task has that id.
    pub fn delete(&mut self, id: &TaskId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.tasks.remove(index);
        tracing::debug!(task_id = %id, "task deleted");
        self.persist();
        true
    }

    /// Flips the completion flag of the task with the given id.
    ///
    /// Returns the new flag, or `None` without persisting if no task has
    /// that id.
    pub fn toggle_completed(&mut self, id: &TaskId) -> Option<bool> {
        let task = self.get_mut(id)?;
        task.completed = !task.completed;
        let completed = task.completed;
        tracing::debug!(task_id = %id, completed, "task toggled");
        self.persist();
        Some(completed)
    }

    /// Sets the priority of the task with the given id.
    ///
    /// Returns `false` without persisting if no task has that id.
    pub fn set_priority(&mut self, id: &TaskId, priority: Priority) -> bool {
        let Some(task) = self.get_mut(id) else {
            return false;
        };
        task.priority = priority;
        tracing::debug!(task_id = %id, %priority, "task priority changed");
        self.persist();
        true
    }

    /// Returns the tasks whose title contains `query` (ignoring case),
    /// ordered by `order`.
    ///
    /// `order` accepts a [`SortOrder`] or a free-form option string; an
    /// unrecognized string keeps collection order. Never persists.
    #[must_use]
    pub fn view(&self, query: &str, order: impl Into<SortOrder>) -> Vec<&Task> {
        filter_and_sort(&self.tasks, query, order.into())
    }

    /// Runs `f` with persistence deferred until it returns.
    ///
    /// At most one save is attempted, after the outermost batch ends, and
    /// only if a mutation inside it changed the collection.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.batch_depth += 1;
        let result = f(self);
        self.batch_depth -= 1;
        if self.batch_depth == 0 && self.batch_pending {
            self.batch_pending = false;
            self.persist();
        }
        result
    }

    /// Retries the save if the previous attempt failed.
    ///
    /// Returns `true` if the store holds the current collection afterwards.
    pub fn flush(&mut self) -> bool {
        if self.dirty {
            self.persist();
        }
        !self.dirty
    }

    /// Whether the in-memory collection has changes the store rejected.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns all tasks in collection order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the task with the given id.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Resolves a full id or a unique id prefix to a task.
    ///
    /// An exact match wins over prefix matches.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] if nothing matches, or
    /// [`TaskError::AmbiguousId`] if several ids share the prefix.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<&Task, TaskError> {
        if let Some(task) = self.tasks.iter().find(|t| t.id.as_str() == prefix) {
            return Ok(task);
        }
        let mut matches = self
            .tasks
            .iter()
            .filter(|t| !prefix.is_empty() && t.id.as_str().starts_with(prefix));
        let first = matches.next();
        let rest = matches.count();
        match first {
            Some(task) if rest == 0 => Ok(task),
            Some(_) => Err(TaskError::AmbiguousId {
                prefix: prefix.to_string(),
                matches: rest + 1,
            }),
            None => Err(TaskError::TaskNotFound(prefix.to_string())),
        }
    }

    /// Number of tasks in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    fn get_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| &t.id == id)
    }

    /// Writes the whole collection, or defers the write inside a batch.
    fn persist(&mut self) {
        if self.batch_depth > 0 {
            self.batch_pending = true;
            return;
        }
        match self.store.save(&self.tasks) {
            Ok(()) => {
                if self.dirty {
                    tracing::info!(count = self.tasks.len(), "task store back in sync");
                }
                self.dirty = false;
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    count = self.tasks.len(),
                    "failed to persist tasks, keeping in-memory state"
                );
                self.dirty = true;
            }
        }
    }
}
