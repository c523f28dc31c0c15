//! Key-value string storage
//!
//! The persistence medium is a synchronous string store addressed by key,
//! the shape of the browser's `localStorage`. Backends here cover tests and
//! native hosts; the browser backend lives with the web bindings.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::Result;

/// Synchronous string store addressed by key
pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; absent keys are not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
