//! Shared data model and persisted format for `Tasklist`.

pub mod codec;
pub mod task;

pub use task::{Priority, SortOrder, Task, TaskId};
