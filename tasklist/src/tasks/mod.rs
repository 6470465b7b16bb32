//! Task collection management.
//!
//! [`TaskManager`] owns the in-memory task list, applies the mutation
//! operations and writes the whole collection back through a
//! [`TaskStore`](crate::storage::TaskStore) after each one. [`view`]
//! derives filtered and sorted projections for display.

pub mod manager;
pub mod view;

pub use manager::TaskManager;
pub use view::{compare_titles, filter_and_sort, matches_query};

use thiserror::Error;

/// Errors that can occur during task operations.
///
/// Mutations addressed to an unknown id are no-ops, not errors. The
/// lookup variants are only produced by
/// [`TaskManager::find_by_prefix`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    /// Task title is empty after trimming.
    #[error("task title cannot be empty")]
    TitleEmpty,
    /// No task id starts with the given prefix.
    #[error("task not found: {0}")]
    TaskNotFound(String),
    /// More than one task id starts with the given prefix.
    #[error("ambiguous task id {prefix:?}: {matches} tasks match")]
    AmbiguousId {
        /// The prefix that was looked up.
        prefix: String,
        /// Number of tasks whose id starts with the prefix.
        matches: usize,
    },
}
