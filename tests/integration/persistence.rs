//! Integration tests for persisting the task collection to disk.
//!
//! Exercises `TaskStore` over `FileStorage` across simulated sessions:
//! each session opens a fresh `TaskManager` on the same data directory.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use tasklist::storage::{FileStorage, KeyValueStore, TaskStore};
use tasklist::tasks::TaskManager;
use tasklist_proto::{Priority, SortOrder};

/// Opens a manager on `dir`, as a new process would.
fn open_session(dir: &std::path::Path) -> TaskManager<FileStorage> {
    TaskManager::open(TaskStore::new(FileStorage::new(dir)))
}

#[test]
fn first_session_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mgr = open_session(dir.path());
    assert!(mgr.is_empty());
}

#[test]
fn state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let (spec_id, milk_id) = {
        let mut mgr = open_session(dir.path());
        let spec = mgr.add("Write spec", Priority::High).unwrap();
        let milk = mgr.add("Buy milk", Priority::Low).unwrap();
        mgr.toggle_completed(&spec.id);
        (spec.id, milk.id)
    };

    let mgr = open_session(dir.path());
    assert_eq!(mgr.len(), 2);
    assert!(mgr.get(&spec_id).unwrap().completed);
    assert_eq!(mgr.get(&milk_id).unwrap().priority, Priority::Low);
    let order: Vec<&str> = mgr
        .view("", SortOrder::Priority)
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(order, vec!["Write spec", "Buy milk"]);
}

#[test]
fn restart_preserves_tasks_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = {
        let mut mgr = open_session(dir.path());
        mgr.add("first", Priority::Medium).unwrap();
        mgr.add("second", Priority::High).unwrap();
        mgr.tasks().to_vec()
    };
    let mgr = open_session(dir.path());
    assert_eq!(mgr.tasks(), snapshot.as_slice());
}

#[test]
fn blob_written_by_browser_version_loads() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    storage
        .set(
            "tasks",
            r#"[
                {"id":"3f2a9c1e-8b7d-4e6f-9a0b-1c2d3e4f5a6b","title":"Buy milk","completed":false,"priority":"low","createdAt":"2024-02-10T08:30:00.000Z"},
                {"id":"7d1b2c3a-4e5f-4a6b-8c7d-9e0f1a2b3c4d","title":"Write spec","completed":true,"priority":"high","createdAt":"2024-02-11T17:45:12.345Z"}
            ]"#,
        )
        .unwrap();

    let mgr = open_session(dir.path());
    assert_eq!(mgr.len(), 2);
    let newest = mgr.view("", "date")[0];
    assert_eq!(newest.title, "Write spec");
    assert_eq!(
        newest.created_at,
        Utc.with_ymd_and_hms(2024, 2, 11, 17, 45, 12).unwrap() + chrono::Duration::milliseconds(345)
    );
}

#[test]
fn malformed_file_starts_empty_and_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tasks.json"), "{\"truncated\": [").unwrap();

    let mut mgr = open_session(dir.path());
    assert!(mgr.is_empty());
    mgr.add("recovered", Priority::Medium).unwrap();

    let mgr = open_session(dir.path());
    assert_eq!(mgr.len(), 1);
    assert_eq!(mgr.tasks()[0].title, "recovered");
}

#[test]
fn stored_file_is_a_json_array_of_records() {
    let dir = tempfile::tempdir().unwrap();
    let mut mgr = open_session(dir.path());
    let task = mgr.add("Check format", Priority::High).unwrap();

    let text = std::fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], task.id.as_str());
    assert_eq!(records[0]["title"], "Check format");
    assert_eq!(records[0]["completed"], false);
    assert_eq!(records[0]["priority"], "high");
    assert!(records[0]["createdAt"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn separate_keys_hold_separate_lists() {
    let dir = tempfile::tempdir().unwrap();
    let mut work = TaskManager::open(TaskStore::with_key(FileStorage::new(dir.path()), "work"));
    let mut home = TaskManager::open(TaskStore::with_key(FileStorage::new(dir.path()), "home"));
    work.add("Ship release", Priority::High).unwrap();
    home.add("Water plants", Priority::Low).unwrap();

    let work = TaskManager::open(TaskStore::with_key(FileStorage::new(dir.path()), "work"));
    assert_eq!(work.len(), 1);
    assert_eq!(work.tasks()[0].title, "Ship release");
}

#[test]
fn unwritable_directory_marks_manager_dirty() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let mut mgr = open_session(&blocker);
    let task = mgr.add("still here", Priority::Medium).unwrap();
    assert!(mgr.is_dirty());
    assert_eq!(mgr.get(&task.id).unwrap().title, "still here");
    assert!(!mgr.flush());
}
