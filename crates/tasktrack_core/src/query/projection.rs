//! Filter/search/sort projection.

use crate::model::task::{ParseLabelError, Task, TaskStatus};
use std::cmp::Reverse;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Status filter applied before sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    pub fn admits(self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl Display for StatusFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => Display::fmt(status, f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse::<TaskStatus>().map(Self::Only)
    }
}

/// Display ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first.
    #[default]
    CreatedAt,
    /// `high`, then `medium`, then `low`.
    Priority,
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreatedAt => f.write_str("created-at"),
            Self::Priority => f.write_str("priority"),
        }
    }
}

impl FromStr for SortKey {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "created-at" | "createdat" | "created_at" | "date" => Ok(Self::CreatedAt),
            "priority" => Ok(Self::Priority),
            other => Err(ParseLabelError::new(
                "sort key",
                other,
                "created-at|priority",
            )),
        }
    }
}

/// View parameters for one projection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub status: StatusFilter,
    /// Case-insensitive title substring; empty matches everything.
    pub search: String,
    pub sort: SortKey,
}

impl TaskQuery {
    fn matches(&self, task: &Task, needle: &str) -> bool {
        self.status.admits(task.status)
            && (needle.is_empty() || task.title.to_lowercase().contains(needle))
    }
}

/// Returns the tasks admitted by `query`, in display order.
///
/// Both sort keys use a stable sort, so ties keep collection order.
pub fn project<'a>(tasks: &'a [Task], query: &TaskQuery) -> Vec<&'a Task> {
    let needle = query.search.to_lowercase();
    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|task| query.matches(task, &needle))
        .collect();

    match query.sort {
        SortKey::CreatedAt => visible.sort_by_key(|task| Reverse(task.created_at)),
        SortKey::Priority => visible.sort_by_key(|task| Reverse(task.priority.weight())),
    }

    visible
}
