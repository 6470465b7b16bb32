//! Task list rendering.

use std::fmt::Write as _;

use tasklist_proto::Task;

use super::short_id;

/// Render one line per task: checkbox, short id, priority, title and
/// creation time formatted with `timestamp_format` (chrono syntax).
///
/// Ids are cut to `id_len` characters. Callers compute it with
/// [`short_id_len`](super::short_id_len) over the whole collection, not just
/// the rendered tasks, so every shown prefix resolves to one task.
#[must_use]
pub fn render(tasks: &[&Task], id_len: usize, timestamp_format: &str) -> String {
    if tasks.is_empty() {
        return "No tasks found\n".to_string();
    }

    let mut out = String::new();
    for task in tasks {
        let checkbox = if task.completed { "[x]" } else { "[ ]" };
        let _ = writeln!(
            out,
            "{checkbox} {id:<id_len$}  {priority:<6}  {title}  ({created})",
            id = short_id(task, id_len),
            priority = task.priority,
            title = task.title,
            created = task.created_at.format(timestamp_format),
        );
    }
    out
}
