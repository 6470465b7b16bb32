//! Property-based tests for `TaskManager`.
//!
//! Uses proptest to verify:
//! 1. Adding non-empty titles grows the collection by one each, with unique ids.
//! 2. Toggling twice and deleting twice are no-ops on the second call.
//! 3. A reopened manager sees exactly the collection the last one wrote.
//! 4. Views only contain matching tasks and sort as requested.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashSet;

use proptest::prelude::*;
use tasklist::storage::{MemoryStorage, TaskStore};
use tasklist::tasks::TaskManager;
use tasklist_proto::Priority;

/// Strategy for generating arbitrary `Priority` values.
fn arb_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
    ]
}

/// Strategy for titles that may be blank.
fn arb_title() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ \t]{0,3}",
        "[ ]{0,2}[A-Za-z][A-Za-z0-9 ]{0,20}",
    ]
}

fn fresh_manager() -> (TaskManager<MemoryStorage>, MemoryStorage) {
    let storage = MemoryStorage::new();
    (TaskManager::open(TaskStore::new(storage.clone())), storage)
}

proptest! {
    /// Collection size equals the number of non-blank titles; ids are unique.
    #[test]
    fn adds_count_non_blank_titles(entries in prop::collection::vec((arb_title(), arb_priority()), 0..40)) {
        let (mut mgr, _) = fresh_manager();
        let mut expected = 0;
        for (title, priority) in &entries {
            let accepted = mgr.add(title, *priority).is_ok();
            prop_assert_eq!(accepted, !title.trim().is_empty());
            if accepted {
                expected += 1;
            }
        }
        prop_assert_eq!(mgr.len(), expected);
        let ids: HashSet<_> = mgr.tasks().iter().map(|t| t.id.clone()).collect();
        prop_assert_eq!(ids.len(), expected);
    }

    /// Toggling any task twice restores the collection.
    #[test]
    fn toggle_twice_is_identity(count in 1usize..10, pick in any::<prop::sample::Index>()) {
        let (mut mgr, _) = fresh_manager();
        for i in 0..count {
            mgr.add(&format!("task {i}"), Priority::Medium).unwrap();
        }
        let before = mgr.tasks().to_vec();
        let id = before[pick.index(count)].id.clone();
        mgr.toggle_completed(&id);
        mgr.toggle_completed(&id);
        prop_assert_eq!(mgr.tasks(), before.as_slice());
    }

    /// A second delete of the same id changes nothing.
    #[test]
    fn delete_twice_is_idempotent(count in 1usize..10, pick in any::<prop::sample::Index>()) {
        let (mut mgr, _) = fresh_manager();
        for i in 0..count {
            mgr.add(&format!("task {i}"), Priority::Low).unwrap();
        }
        let id = mgr.tasks()[pick.index(count)].id.clone();
        prop_assert!(mgr.delete(&id));
        let after_first = mgr.tasks().to_vec();
        prop_assert!(!mgr.delete(&id));
        prop_assert_eq!(mgr.tasks(), after_first.as_slice());
        prop_assert_eq!(mgr.len(), count - 1);
    }

    /// Reopening over the same store reproduces the collection exactly.
    #[test]
    fn reopen_reproduces_collection(
        entries in prop::collection::vec((arb_title(), arb_priority(), any::<bool>()), 0..20),
    ) {
        let (mut mgr, storage) = fresh_manager();
        for (title, priority, complete) in &entries {
            if let Ok(task) = mgr.add(title, *priority) {
                if *complete {
                    mgr.toggle_completed(&task.id);
                }
            }
        }
        let reopened = TaskManager::open(TaskStore::new(storage));
        prop_assert_eq!(reopened.tasks(), mgr.tasks());
    }

    /// Priority views are non-increasing in rank and contain only matches.
    #[test]
    fn priority_view_is_sorted_and_filtered(
        entries in prop::collection::vec((arb_title(), arb_priority()), 0..30),
        query in "[a-zA-Z]{0,2}",
    ) {
        let (mut mgr, _) = fresh_manager();
        for (title, priority) in &entries {
            let _ = mgr.add(title, *priority);
        }
        let view = mgr.view(&query, "priority");
        let needle = query.to_lowercase();
        prop_assert!(view.iter().all(|t| t.title.to_lowercase().contains(&needle)));
        prop_assert!(view.windows(2).all(|w| w[0].priority.rank() >= w[1].priority.rank()));
        let expected = mgr.tasks().iter().filter(|t| t.title.to_lowercase().contains(&needle)).count();
        prop_assert_eq!(view.len(), expected);
    }
}
