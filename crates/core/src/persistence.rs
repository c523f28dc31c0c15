//! Task collection persistence
//!
//! The whole collection is written under one key as a JSON array on every
//! save. Loading never fails: missing, unreadable or corrupt data yields an
//! empty collection so a bad store cannot stop the app from starting.

use tracing::{debug, info, warn};

use crate::config::TodoConfig;
use crate::storage::KeyValueStore;
use crate::task::Task;
use crate::Result;

pub struct TaskPersistence<S> {
    store: S,
    key: String,
    pretty: bool,
}

impl<S: KeyValueStore> TaskPersistence<S> {
    /// Persist under the default key
    pub fn new(store: S) -> Self {
        Self::with_config(store, &TodoConfig::default())
    }

    pub fn with_config(store: S, config: &TodoConfig) -> Self {
        Self {
            store,
            key: config.storage_key.clone(),
            pretty: config.pretty_json,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Overwrite the stored collection with `tasks`
    pub fn save(&mut self, tasks: &[Task]) -> Result<()> {
        let content = if self.pretty {
            serde_json::to_string_pretty(tasks)?
        } else {
            serde_json::to_string(tasks)?
        };
        self.store.set(&self.key, &content)?;
        debug!(key = %self.key, count = tasks.len(), "Saved tasks");
        Ok(())
    }

    /// Read the stored collection, distinguishing "nothing stored" from
    /// read and parse failures
    pub fn try_load(&self) -> Result<Option<Vec<Task>>> {
        let Some(content) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let tasks = serde_json::from_str(&content)?;
        Ok(Some(tasks))
    }

    /// Read the stored collection, falling back to an empty one
    pub fn load(&self) -> Vec<Task> {
        match self.try_load() {
            Ok(Some(tasks)) => {
                info!(key = %self.key, count = tasks.len(), "Loaded tasks");
                tasks
            }
            Ok(None) => {
                info!(key = %self.key, "No stored tasks, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(key = %self.key, "Ignoring unreadable stored tasks: {}", e);
                Vec::new()
            }
        }
    }

    /// Remove the stored collection
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use crate::task::TaskId;
    use crate::Error;
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    fn sample() -> Vec<Task> {
        vec![
            Task::new(TaskId(1_700_000_000_002), "Pay rent", at(1_700_000_000_002)),
            Task::new(TaskId(1_700_000_000_001), "<b>bold</b> & \"quoted\"", at(1_700_000_000_001))
                .with_completed(true),
            Task::new(TaskId(1_700_000_000_000), "Buy milk", at(1_700_000_000_000)),
        ]
    }

    #[test]
    fn test_save_then_load() {
        let mut persistence = TaskPersistence::new(MemoryStorage::new());
        let tasks = sample();

        persistence.save(&tasks).unwrap();
        assert_eq!(persistence.load(), tasks);
    }

    #[test]
    fn test_save_writes_fixed_key_as_array() {
        let mut persistence = TaskPersistence::new(MemoryStorage::new());
        persistence.save(&sample()).unwrap();

        let raw = persistence.store().get("todos").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array[0]["text"], "Pay rent");
        assert!(array[0].get("createdAt").is_some());
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let mut persistence = TaskPersistence::new(MemoryStorage::new());
        persistence.save(&sample()).unwrap();
        persistence.save(&[]).unwrap();
        assert!(persistence.load().is_empty());
        assert_eq!(persistence.store().get("todos").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let persistence = TaskPersistence::new(MemoryStorage::new());
        assert!(persistence.load().is_empty());
        assert!(persistence.try_load().unwrap().is_none());
    }

    #[test]
    fn test_load_corrupt_data_is_empty() {
        let store = MemoryStorage::new().with_entry("todos", "{not json");
        let persistence = TaskPersistence::new(store);

        assert!(persistence.load().is_empty());
        assert!(matches!(persistence.try_load(), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let store = MemoryStorage::new().with_entry("todos", r#"{"id": 1}"#);
        assert!(TaskPersistence::new(store).load().is_empty());
    }

    #[test]
    fn test_load_browser_written_data() {
        let raw = r#"[{"id":1700000000123,"text":"Pay rent","completed":false,"createdAt":"2023-11-14T22:13:20.123Z"}]"#;
        let store = MemoryStorage::new().with_entry("todos", raw);
        let tasks = TaskPersistence::new(store).load();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, TaskId(1_700_000_000_123));
        assert_eq!(tasks[0].created_at, at(1_700_000_000_123));
    }

    #[test]
    fn test_save_failure_propagates() {
        let mut persistence = TaskPersistence::new(MemoryStorage::with_quota(16));
        let result = persistence.save(&sample());
        assert!(matches!(result, Err(Error::QuotaExceeded { .. })));
    }

    #[test]
    fn test_configured_key_and_pretty_output() {
        let config = TodoConfig {
            storage_key: "work".to_string(),
            pretty_json: true,
            ..TodoConfig::default()
        };
        let mut persistence = TaskPersistence::with_config(MemoryStorage::new(), &config);
        persistence.save(&sample()).unwrap();

        assert_eq!(persistence.key(), "work");
        assert!(persistence.store().get("todos").unwrap().is_none());
        let raw = persistence.store().get("work").unwrap().unwrap();
        assert!(raw.contains('\n'));
        assert_eq!(persistence.load(), sample());
    }

    #[test]
    fn test_clear() {
        let mut persistence = TaskPersistence::new(MemoryStorage::new());
        persistence.save(&sample()).unwrap();
        persistence.clear().unwrap();
        assert!(persistence.try_load().unwrap().is_none());
    }

    #[test]
    fn test_file_backed_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let config = TodoConfig {
            data_dir: temp_dir.path().to_path_buf(),
            ..TodoConfig::default()
        };

        {
            let store = FileStorage::open(config.storage_path()).unwrap();
            let mut persistence = TaskPersistence::with_config(store, &config);
            persistence.save(&sample()).unwrap();
        }

        let store = FileStorage::open(config.storage_path()).unwrap();
        let persistence = TaskPersistence::with_config(store, &config);
        assert_eq!(persistence.load(), sample());
    }

    #[test]
    fn test_damaged_storage_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let config = TodoConfig {
            data_dir: temp_dir.path().to_path_buf(),
            ..TodoConfig::default()
        };
        std::fs::write(config.storage_path(), "{\"todos\": \"[{").unwrap();

        let store = FileStorage::open(config.storage_path()).unwrap();
        let mut persistence = TaskPersistence::with_config(store, &config);
        assert!(persistence.load().is_empty());

        persistence.save(&sample()).unwrap();
        let reopened = FileStorage::open(config.storage_path()).unwrap();
        assert_eq!(TaskPersistence::with_config(reopened, &config).load(), sample());
    }

    fn arb_task() -> impl Strategy<Value = Task> {
        (any::<u64>(), ".*", any::<bool>(), 0i64..4_102_444_800_000).prop_map(
            |(id, text, completed, millis)| {
                Task::new(TaskId(id), text, at(millis)).with_completed(completed)
            },
        )
    }

    proptest! {
        #[test]
        fn prop_load_after_save_is_identity(tasks in proptest::collection::vec(arb_task(), 0..16)) {
            let mut persistence = TaskPersistence::new(MemoryStorage::new());
            persistence.save(&tasks).unwrap();
            prop_assert_eq!(persistence.load(), tasks);
        }
    }
}
