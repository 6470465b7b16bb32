//! Task data model for `Tasklist`.
//!
//! Defines the single persisted entity ([`Task`]), its identifier, the
//! priority scale and the sort orders a view can be requested in. The
//! serde layout matches the persisted JSON records: `id`, `title`,
//! `completed`, `priority` and `createdAt`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque unique identifier for a task.
///
/// Freshly generated ids are UUID v7 text, but any string read back from
/// storage is accepted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a new time-ordered task identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when a priority name is not one of `low`, `medium`, `high`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority: {0:?} (expected low, medium or high)")]
pub struct ParsePriorityError(pub String);

/// Importance of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Lowest rank.
    Low,
    /// Default rank for new tasks.
    #[default]
    Medium,
    /// Highest rank.
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Ordinal used for sorting: `high = 3`, `medium = 2`, `low = 1`.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Returns the persisted name of this priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ParsePriorityError(other.to_string())),
        }
    }
}

/// Ordering applied to a view of the task collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Most recently created first.
    #[default]
    Date,
    /// Highest priority first; ties keep collection order.
    Priority,
    /// Ascending by title, case-insensitive.
    Alphabetical,
    /// Collection order, unchanged.
    Insertion,
}

impl SortOrder {
    /// Maps a free-form sort option to an order.
    ///
    /// Recognizes `date`, `priority` and `alphabetical`. Anything else falls
    /// back to [`SortOrder::Insertion`].
    #[must_use]
    pub fn from_option(option: &str) -> Self {
        match option {
            "date" => Self::Date,
            "priority" => Self::Priority,
            "alphabetical" => Self::Alphabetical,
            _ => Self::Insertion,
        }
    }

    /// Returns the option name for this order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Priority => "priority",
            Self::Alphabetical => "alphabetical",
            Self::Insertion => "insertion",
        }
    }
}

impl From<&str> for SortOrder {
    fn from(option: &str) -> Self {
        Self::from_option(option)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique, immutable identifier.
    pub id: TaskId,
    /// Display text, trimmed and non-empty when created through the manager.
    pub title: String,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
    /// Task priority.
    #[serde(default)]
    pub priority: Priority,
    /// Creation time, millisecond precision.
    #[serde(with = "crate::codec::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates an open task with a fresh identifier.
    ///
    /// `created_at` is truncated to millisecond precision so the task
    /// survives a persist/load cycle unchanged.
    #[must_use]
    pub fn new(title: impl Into<String>, priority: Priority, created_at: DateTime<Utc>) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            completed: false,
            priority,
            created_at: truncate_to_millis(created_at),
        }
    }
}

/// Drops sub-millisecond precision from a timestamp.
fn truncate_to_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or(at)
}
