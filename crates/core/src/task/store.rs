//! In-memory task collection
//!
//! `TaskList` is the single owner of the tasks. Newest tasks sit at the
//! front; every other operation preserves relative order. Mutations report
//! whether anything changed and leave persistence to the caller.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::id::IdGenerator;
use super::model::{Filter, Stats, Task, TaskId};

#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    ids: IdGenerator,
}

impl TaskList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a previously persisted collection, keeping its order.
    ///
    /// Stored data may repeat an id. The first task keeps it and every later
    /// one is renumbered, so each row stays individually addressable.
    pub fn from_tasks(mut tasks: Vec<Task>) -> Self {
        let mut ids = IdGenerator::seeded(tasks.iter().map(|t| t.id));
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &mut tasks {
            if !seen.insert(task.id) {
                let fresh = ids.next(task.created_at);
                warn!(duplicate = %task.id, %fresh, "Renumbered task with a repeated id");
                task.id = fresh;
                seen.insert(fresh);
            }
        }
        Self { tasks, ids }
    }

    /// Add a task stamped with the current time
    pub fn add(&mut self, text: &str) -> Option<TaskId> {
        self.add_at(text, Utc::now())
    }

    /// Add a task created at `now`.
    ///
    /// Returns `None` without touching the list when the trimmed text is
    /// empty.
    pub fn add_at(&mut self, text: &str, now: DateTime<Utc>) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = self.ids.next(now);
        self.tasks.insert(0, Task::new(id, text, now));
        debug!(%id, "Added task");
        Some(id)
    }

    /// Remove the task with `id`, returning whether it existed
    pub fn delete(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        debug!(%id, removed, "Delete task");
        removed
    }

    /// Flip the completion state of `id`, returning whether it existed
    pub fn toggle(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.completed = !task.completed;
        debug!(%id, completed = task.completed, "Toggled task");
        true
    }

    /// Drop every completed task, returning how many were removed
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        debug!(removed, "Cleared completed tasks");
        removed
    }

    /// Tasks matching `filter`, in collection order
    pub fn filtered(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn stats(&self) -> Stats {
        Stats::from_tasks(&self.tasks)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
