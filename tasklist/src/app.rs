//! Command dispatch for the CLI front end.
//!
//! Translates a parsed [`Command`] into [`TaskManager`] calls and renders
//! the outcome as text. Unknown or ambiguous id prefixes are reported as
//! errors here; the manager itself treats unknown ids as no-ops.

use tasklist_proto::{SortOrder, TaskId};

use crate::config::{AppConfig, Command};
use crate::storage::KeyValueStore;
use crate::tasks::{TaskError, TaskManager};
use crate::ui::{self, task_panel};

/// Runs `command` against `manager` and returns the text to print.
///
/// `None` lists tasks with the configured default sort.
///
/// # Errors
///
/// Returns [`TaskError`] for an empty title or an id prefix that matches
/// no task or several tasks.
pub fn execute<S: KeyValueStore>(
    manager: &mut TaskManager<S>,
    command: Option<Command>,
    config: &AppConfig,
) -> Result<String, TaskError> {
    let command = command.unwrap_or(Command::List {
        search: String::new(),
        sort: None,
    });

    match command {
        Command::Add { title, priority } => {
            let task = manager.add(&title.join(" "), priority)?;
            Ok(format!("Added {} [{}] {}\n", task.id, task.priority, task.title))
        }
        Command::List { search, sort } => {
            let order = sort
                .as_deref()
                .map_or(config.default_sort, SortOrder::from_option);
            let view = manager.view(&search, order);
            let id_len = ui::short_id_len(manager.tasks());
            Ok(task_panel::render(&view, id_len, &config.timestamp_format))
        }
        Command::Toggle { id } => {
            let id = resolve(manager, &id)?;
            let completed = manager
                .toggle_completed(&id)
                .ok_or_else(|| TaskError::TaskNotFound(id.to_string()))?;
            let verb = if completed { "Completed" } else { "Reopened" };
            Ok(format!("{verb} {id}\n"))
        }
        Command::Delete { id } => {
            let id = resolve(manager, &id)?;
            if !manager.delete(&id) {
                return Err(TaskError::TaskNotFound(id.to_string()));
            }
            Ok(format!("Deleted {id}\n"))
        }
        Command::Priority { id, priority } => {
            let id = resolve(manager, &id)?;
            if !manager.set_priority(&id, priority) {
                return Err(TaskError::TaskNotFound(id.to_string()));
            }
            Ok(format!("Set {id} to {priority}\n"))
        }
    }
}

fn resolve<S: KeyValueStore>(manager: &TaskManager<S>, prefix: &str) -> Result<TaskId, TaskError> {
    manager.find_by_prefix(prefix).map(|task| task.id.clone())
}
