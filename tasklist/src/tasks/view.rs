//! Filtered and sorted projections of the task collection.

use std::cmp::Ordering;
use std::sync::LazyLock;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};
use tasklist_proto::{SortOrder, Task};

/// Returns true if `title` contains `query`, ignoring case.
///
/// An empty query matches every title.
#[must_use]
pub fn matches_query(title: &str, query: &str) -> bool {
    title.to_lowercase().contains(&query.to_lowercase())
}

/// Root-locale collator shared by every alphabetical view.
static TITLE_COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> = LazyLock::new(|| {
    Collator::try_new(CollatorPreferences::default(), CollatorOptions::default())
        .inspect_err(|e| {
            tracing::warn!(error = %e, "title collator unavailable, using case-folded order");
        })
        .ok()
});

/// Compares two titles for alphabetical display.
///
/// Uses Unicode collation (root locale), so accented letters sort next to
/// their base letter and case only matters when titles are otherwise
/// equal, lowercase first. Titles the collator considers equal fall back
/// to code-point order.
#[must_use]
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    TITLE_COLLATOR
        .as_ref()
        .map_or_else(|| case_folded_order(a, b), |collator| collator.compare(a, b))
        .then_with(|| a.cmp(b))
}

/// Case-insensitive order with a lowercase-first tiebreak, used when no
/// collation data is available.
fn case_folded_order(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| {
        a.chars()
            .zip(b.chars())
            .find(|(x, y)| x != y)
            .map_or_else(
                || a.len().cmp(&b.len()),
                |(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => x.cmp(&y),
                },
            )
    })
}

/// Selects the tasks whose title matches `query` and orders them.
///
/// The sort is stable: tasks that compare equal keep their collection
/// order. [`SortOrder::Insertion`] leaves the collection order untouched.
#[must_use]
pub fn filter_and_sort<'a>(tasks: &'a [Task], query: &str, order: SortOrder) -> Vec<&'a Task> {
    let mut selected: Vec<&Task> = tasks
        .iter()
        .filter(|task| matches_query(&task.title, query))
        .collect();

    match order {
        SortOrder::Date => selected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Priority => {
            selected.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
        }
        SortOrder::Alphabetical => selected.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortOrder::Insertion => {}
    }
    selected
}
