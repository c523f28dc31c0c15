//! File-based storage backend
//!
//! Stores every key in a single JSON object on disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::KeyValueStore;
use crate::Result;

/// File-backed key-value store
pub struct FileStorage {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory cache of entries
    cache: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the store at `path`.
    ///
    /// If the file doesn't exist, it will be created on first write. A file
    /// that isn't a JSON object of strings is treated as empty and replaced
    /// on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Ignoring unreadable storage file {}: {}", path.display(), e);
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, cache })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Write the cache to disk
    fn persist(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.cache)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Staged next to the target; the rename replaces it in one step
        let staging = self.staging_path();
        fs::write(&staging, content)?;
        if let Err(e) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        debug!("Wrote storage file: {}", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let previous = self.cache.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist() {
            // Keep the cache in step with what is on disk
            match previous {
                Some(old) => self.cache.insert(key.to_string(), old),
                None => self.cache.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.cache.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        let store = FileStorage::open(&path).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (store, _temp) = create_test_store();
        assert_eq!(store.get("todos").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_set_and_get() {
        let (mut store, _temp) = create_test_store();
        store.set("todos", "[]").unwrap();
        assert_eq!(store.get("todos").unwrap().as_deref(), Some("[]"));
        assert!(store.path().exists());
    }

    #[test]
    fn test_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("store.json");

        {
            let mut store = FileStorage::open(&path).unwrap();
            store.set("todos", r#"[{"id":1}]"#).unwrap();
            store.set("other", "x").unwrap();
        }

        {
            let store = FileStorage::open(&path).unwrap();
            assert_eq!(store.get("todos").unwrap().as_deref(), Some(r#"[{"id":1}]"#));
            assert_eq!(store.get("other").unwrap().as_deref(), Some("x"));
        }
    }

    #[test]
    fn test_remove() {
        let (mut store, temp) = create_test_store();
        store.set("todos", "[]").unwrap();
        store.remove("todos").unwrap();
        assert_eq!(store.get("todos").unwrap(), None);

        let reopened = FileStorage::open(temp.path().join("store.json")).unwrap();
        assert_eq!(reopened.get("todos").unwrap(), None);

        // Removing an absent key is fine
        store.remove("todos").unwrap();
    }

    #[test]
    fn test_truncated_file_opens_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, r#"{"todos": "[{\"id\":1"#).unwrap();

        let mut store = FileStorage::open(&path).unwrap();
        assert_eq!(store.get("todos").unwrap(), None);

        store.set("todos", "[]").unwrap();
        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("todos").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_wrong_shape_opens_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, r#"{"todos": [1, 2]}"#).unwrap();

        let store = FileStorage::open(&path).unwrap();
        assert!(store.get("todos").unwrap().is_none());
    }

    #[test]
    fn test_write_leaves_no_staging_file() {
        let (mut store, temp) = create_test_store();
        store.set("todos", "[]").unwrap();
        store.set("todos", r#"[{"id":2}]"#).unwrap();

        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, ["store.json"]);
    }

    #[test]
    fn test_failed_write_rolls_back_cache() {
        let temp_dir = TempDir::new().unwrap();
        // The parent "directory" is a regular file, so writes must fail
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let mut store = FileStorage::open(blocker.join("store.json")).unwrap();

        assert!(store.set("todos", "[]").is_err());
        assert_eq!(store.get("todos").unwrap(), None);
    }
}
