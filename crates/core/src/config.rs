//! Runtime configuration
//!
//! Values come from the environment on native hosts; the browser build uses
//! the defaults.

use std::path::PathBuf;

use tracing::info;

use crate::{Error, Result};

/// Key the collection is stored under
pub const DEFAULT_STORAGE_KEY: &str = "todos";

/// Directory used by file-backed storage
pub const DEFAULT_DATA_DIR: &str = ".todo-data";

const STORAGE_FILE: &str = "todos.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    pub storage_key: String,
    pub data_dir: PathBuf,
    pub pretty_json: bool,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            pretty_json: false,
        }
    }
}

impl TodoConfig {
    /// Read `TODO_STORAGE_KEY`, `TODO_DATA_DIR` and `TODO_PRETTY_JSON`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let storage_key = match lookup("TODO_STORAGE_KEY") {
            Some(raw) if raw.trim().is_empty() => {
                return Err(Error::Config("TODO_STORAGE_KEY must not be empty".into()));
            }
            Some(raw) => raw.trim().to_string(),
            None => defaults.storage_key,
        };

        let data_dir = lookup("TODO_DATA_DIR")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let pretty_json = flag(lookup("TODO_PRETTY_JSON"), defaults.pretty_json);

        let config = Self {
            storage_key,
            data_dir,
            pretty_json,
        };
        info!("Using storage key {:?} in {:?}", config.storage_key, config.data_dir);
        Ok(config)
    }

    /// File used by `FileStorage`
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }
}

fn flag(raw: Option<String>, default: bool) -> bool {
    match raw {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}
