//! Task model definitions

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Numeric task identifier, stored as a bare JSON number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single entry in the task list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create an incomplete task.
    ///
    /// The timestamp is truncated to milliseconds, the precision the
    /// browser store uses for `createdAt`.
    pub fn new(id: TaskId, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            created_at: created_at.trunc_subsecs(3),
        }
    }

    /// Set the completion state
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Which subset of the list is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Every filter, in the order the controls are displayed
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    /// Name used in `data-filter` attributes and persisted settings
    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" => Ok(Filter::Completed),
            other => Err(Error::InvalidInput(format!("unknown filter: {other:?}"))),
        }
    }
}

/// Aggregate counts over the whole collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl Stats {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            if task.completed {
                stats.completed += 1;
            } else {
                stats.active += 1;
            }
            stats
        })
    }

    /// Running count of incomplete tasks, e.g. "1 task" or "3 tasks"
    pub fn label(&self) -> String {
        let noun = if self.active == 1 { "task" } else { "tasks" };
        format!("{} {}", self.active, noun)
    }
}
