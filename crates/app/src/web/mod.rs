//! Browser runtime
//!
//! Binds the controller to a real page: `localStorage` for persistence,
//! the document for display, DOM listeners for interaction.

mod app;
pub mod logging;
mod storage;
mod surface;

pub use app::TodoApp;
pub use storage::LocalStorage;
pub use surface::WebSurface;
