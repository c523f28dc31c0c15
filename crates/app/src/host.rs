//! File-backed hosting for environments without a browser

use tracing::info;

use todo_core::storage::FileStorage;
use todo_core::{Result, TaskPersistence, TodoConfig};

use crate::controller::Controller;
use crate::surface::Surface;

pub type FileController<V> = Controller<FileStorage, V>;

/// Mount `surface` on the task file described by `config`
pub fn open<V: Surface>(config: &TodoConfig, surface: V) -> Result<FileController<V>> {
    let path = config.storage_path();
    let store = FileStorage::open(&path)?;
    info!("Opened task file {}", path.display());
    Ok(Controller::new(TaskPersistence::with_config(store, config), surface))
}

/// Like [`open`], configured from `TODO_*` environment variables
pub fn open_from_env<V: Surface>(surface: V) -> Result<FileController<V>> {
    open(&TodoConfig::from_env()?, surface)
}
