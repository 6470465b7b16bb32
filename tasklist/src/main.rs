//! `Tasklist`: single-user task list editor.
//!
//! Each invocation opens the task collection from the data directory,
//! runs one command and writes the collection back. Configuration via CLI
//! flags, environment variables, or config file
//! (`~/.config/tasklist/config.toml`).
//!
//! ```bash
//! tasklist add Buy milk --priority low
//! tasklist list --search milk --sort alphabetical
//! tasklist toggle 0190a1b2
//!
//! # Keep tasks somewhere else
//! TASKLIST_DATA_DIR=/tmp/tasks tasklist list
//! ```

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use tasklist::app;
use tasklist::config::{AppConfig, CliArgs};
use tasklist::storage::{FileStorage, TaskStore};
use tasklist::tasks::TaskManager;

fn main() -> ExitCode {
    let cli = CliArgs::parse();
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match AppConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            AppConfig::from_cli(&cli)
        }
    };

    tracing::debug!(data_dir = %config.data_dir.display(), key = %config.storage_key, "opening task store");
    let store = TaskStore::with_key(
        FileStorage::new(&config.data_dir),
        config.storage_key.clone(),
    );
    let mut manager = TaskManager::open(store);

    let result = app::execute(&mut manager, cli.command, &config);

    if manager.is_dirty() {
        eprintln!(
            "Warning: changes could not be saved to {}",
            config.data_dir.display()
        );
        return ExitCode::FAILURE;
    }

    match result {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging.
///
/// Logs go to stderr unless a log file is given, so command output on
/// stdout stays clean. With a file, returns a [`WorkerGuard`] that must be
/// held until shutdown to ensure all buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let Some(log_path) = file_path else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter)
            .init();
        return None;
    };

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
