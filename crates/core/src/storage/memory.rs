//! In-process storage backend

use std::collections::HashMap;

use super::KeyValueStore;
use crate::{Error, Result};

/// Map-backed store with an optional byte quota.
///
/// The quota counts key and value bytes across all entries, so a full store
/// rejects writes the way a browser store does once its limit is hit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes that would push the total size past `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Seed a value without quota checks
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Change or lift the quota
    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            let replaced = self.entries.get(key).map_or(0, |old| key.len() + old.len());
            let after = self.used_bytes() - replaced + key.len() + value.len();
            if after > quota {
                return Err(Error::QuotaExceeded {
                    key: key.to_string(),
                    bytes: value.len(),
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStorage::new();
        assert_eq!(store.get("todos").unwrap(), None);

        store.set("todos", "[]").unwrap();
        assert_eq!(store.get("todos").unwrap().as_deref(), Some("[]"));

        store.set("todos", "[1]").unwrap();
        assert_eq!(store.get("todos").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.len(), 1);

        store.remove("todos").unwrap();
        assert!(store.is_empty());
        store.remove("todos").unwrap();
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        let mut store = MemoryStorage::with_quota(10);
        store.set("k", "12345").unwrap();

        let err = store.set("k", "0123456789").unwrap_err();
        match err {
            Error::QuotaExceeded { key, bytes } => {
                assert_eq!(key, "k");
                assert_eq!(bytes, 10);
            }
            e => panic!("Expected QuotaExceeded error, got: {:?}", e),
        }

        // Failed write leaves the previous value in place
        assert_eq!(store.get("k").unwrap().as_deref(), Some("12345"));
    }

    #[test]
    fn test_quota_counts_replacement_not_sum() {
        let mut store = MemoryStorage::with_quota(8);
        store.set("k", "1234567").unwrap();
        store.set("k", "7654321").unwrap();
        assert_eq!(store.used_bytes(), 8);
    }

    #[test]
    fn test_lifting_quota() {
        let mut store = MemoryStorage::with_quota(1);
        assert!(store.set("key", "value").is_err());
        store.set_quota(None);
        assert!(store.set("key", "value").is_ok());
    }
}
