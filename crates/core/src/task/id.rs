//! Task id generation
//!
//! Ids are derived from the creation timestamp in milliseconds, the way the
//! browser store has always numbered tasks, but never repeat: a second task
//! created in the same millisecond (or after the clock stepped back) gets
//! the next integer instead.

use chrono::{DateTime, Utc};

use super::model::TaskId;

#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start above every id already in use
    pub fn seeded<I>(existing: I) -> Self
    where
        I: IntoIterator<Item = TaskId>,
    {
        let last = existing.into_iter().map(|id| id.0).max().unwrap_or(0);
        Self { last }
    }

    pub fn next(&mut self, now: DateTime<Utc>) -> TaskId {
        // Pre-epoch clocks clamp to zero and fall through to the counter.
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last.saturating_add(1));
        self.last = id;
        TaskId(id)
    }
}
