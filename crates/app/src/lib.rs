//! Todo app front end
//!
//! Renders the task list held by `todo-core` and wires user interaction
//! back into it:
//! - `dom`: the display tree the renderer produces
//! - `view`: projection of the filtered list and its element handlers
//! - `surface`: the page the view is mounted on
//! - `controller`: event dispatch, persistence and re-rendering
//! - `host`: file-backed controllers for native hosts
//! - `web` (wasm32 only): browser DOM and `localStorage` bindings

pub mod controller;
pub mod dom;
pub mod event;
pub mod host;
pub mod surface;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use controller::Controller;
pub use event::{Handle, Trigger, UiEvent};
pub use surface::{HeadlessSurface, Surface};
pub use view::{Projection, Renderer};
