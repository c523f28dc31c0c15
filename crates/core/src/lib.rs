//! Core library for the todo app
//!
//! This crate contains the state-management side of the app:
//! - Task collection and its mutations
//! - Key-value storage backends
//! - Persistence of the collection
//! - Configuration

pub mod config;
pub mod error;
pub mod persistence;
pub mod storage;
pub mod task;

pub use config::TodoConfig;
pub use error::Error;
pub use persistence::TaskPersistence;
pub use storage::KeyValueStore;
pub use task::{Filter, Stats, Task, TaskId, TaskList};

pub type Result<T> = std::result::Result<T, Error>;
