//! Interaction events delivered to the controller

use std::fmt;
use std::str::FromStr;

use todo_core::{Error, Filter};

/// Identifies one interactive element of one projection.
///
/// Handles are never reused, so an event from an element that a later
/// render replaced cannot resolve to a live binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub u64);

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

impl FromStr for Handle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('h')
            .and_then(|n| n.parse::<u64>().ok())
            .map(Handle)
            .ok_or_else(|| Error::InvalidInput(format!("not an element handle: {s:?}")))
    }
}

/// DOM event type an element reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Click,
    Change,
}

impl Trigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Trigger::Click => "click",
            Trigger::Change => "change",
        }
    }
}

impl FromStr for Trigger {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "click" => Ok(Trigger::Click),
            "change" => Ok(Trigger::Change),
            other => Err(Error::InvalidInput(format!("unsupported event type: {other:?}"))),
        }
    }
}

/// A user interaction, as seen by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The add control was clicked
    AddClicked,
    /// A key was pressed in the text input; only `"Enter"` adds
    KeyPress { key: String },
    /// The clear-completed control was clicked
    ClearCompletedClicked,
    /// One of the filter controls was clicked
    FilterSelected(Filter),
    /// An element inside the task list fired `trigger`
    Element { handle: Handle, trigger: Trigger },
}

impl UiEvent {
    pub fn key(key: impl Into<String>) -> Self {
        UiEvent::KeyPress { key: key.into() }
    }

    pub fn click(handle: Handle) -> Self {
        UiEvent::Element {
            handle,
            trigger: Trigger::Click,
        }
    }

    pub fn change(handle: Handle) -> Self {
        UiEvent::Element {
            handle,
            trigger: Trigger::Change,
        }
    }
}
