//! Plain-text rendering for the command line.

pub mod task_panel;

use std::collections::HashSet;

use tasklist_proto::Task;

/// Shortest id prefix shown in listings.
pub const MIN_SHORT_ID_LEN: usize = 8;

/// Returns the id prefix length (in chars) that keeps every task's
/// displayed id unique within `tasks`, never shorter than
/// [`MIN_SHORT_ID_LEN`].
///
/// Time-ordered ids share their leading characters, so the length grows
/// until the prefixes differ.
#[must_use]
pub fn short_id_len(tasks: &[Task]) -> usize {
    let longest = tasks
        .iter()
        .map(|t| t.id.as_str().chars().count())
        .max()
        .unwrap_or(0);
    (MIN_SHORT_ID_LEN..longest)
        .find(|&len| {
            let mut seen = HashSet::with_capacity(tasks.len());
            tasks.iter().all(|t| seen.insert(short_id(t, len)))
        })
        .unwrap_or_else(|| longest.max(MIN_SHORT_ID_LEN))
}

/// First `len` characters of the task's id.
#[must_use]
pub fn short_id(task: &Task, len: usize) -> String {
    task.id.as_str().chars().take(len).collect()
}
