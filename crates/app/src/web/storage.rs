//! `localStorage` backend

use wasm_bindgen::{JsCast, JsValue};
use web_sys::DomException;

use todo_core::{Error, KeyValueStore, Result};

/// `DOMException` names browsers use for a full `localStorage`
const QUOTA_ERROR_NAMES: [&str; 2] = ["QuotaExceededError", "NS_ERROR_DOM_QUOTA_REACHED"];

pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// The window's `localStorage`; fails in contexts that block it
    pub fn open() -> Result<Self> {
        let storage = web_sys::window()
            .ok_or_else(|| Error::Storage("no window".into()))?
            .local_storage()
            .map_err(|e| Error::Storage(format!("localStorage blocked: {e:?}")))?
            .ok_or_else(|| Error::Storage("localStorage not available".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| Error::Storage(format!("failed to read {key}: {e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| {
                if is_quota_error(&e) {
                    Error::QuotaExceeded {
                        key: key.to_string(),
                        bytes: value.len(),
                    }
                } else {
                    Error::Storage(format!("failed to write {key}: {e:?}"))
                }
            })
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| Error::Storage(format!("failed to remove {key}: {e:?}")))
    }
}

fn is_quota_error(error: &JsValue) -> bool {
    error
        .dyn_ref::<DomException>()
        .is_some_and(|e| QUOTA_ERROR_NAMES.contains(&e.name().as_str()))
}
