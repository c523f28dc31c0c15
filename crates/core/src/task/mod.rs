//! Task module
//!
//! This module contains the task model, id generation and the in-memory
//! task collection.

mod id;
mod model;
mod store;

pub use id::IdGenerator;
pub use model::*;
pub use store::TaskList;
