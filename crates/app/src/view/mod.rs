//! View rendering
//!
//! Projects the filtered task list into a display tree plus the table of
//! element handlers that goes with it.

mod binding;
mod render;

pub use binding::*;
pub use render::*;
