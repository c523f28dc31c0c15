//! Element handler bindings

use std::collections::HashMap;

use todo_core::TaskId;

use crate::event::{Handle, Trigger};

/// What a row control does to its task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    Toggle,
    Delete,
}

/// Handler attached to one rendered element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub handle: Handle,
    pub task_id: TaskId,
    pub action: RowAction,
    pub trigger: Trigger,
}

/// Handlers for the elements currently on screen.
///
/// Replaced wholesale on every render; dropping the old table is what
/// releases the handlers of elements that are no longer displayed.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    bindings: HashMap<Handle, Binding>,
}

impl BindingTable {
    pub fn new(bindings: impl IntoIterator<Item = Binding>) -> Self {
        Self {
            bindings: bindings.into_iter().map(|b| (b.handle, b)).collect(),
        }
    }

    /// The binding `handle` resolves to for `trigger`, if it is still live
    pub fn resolve(&self, handle: Handle, trigger: Trigger) -> Option<&Binding> {
        self.bindings.get(&handle).filter(|b| b.trigger == trigger)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.values()
    }
}
