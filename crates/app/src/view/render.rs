//! Task list projection

use todo_core::{Stats, Task};

use super::binding::{Binding, BindingTable, RowAction};
use crate::dom::{Element, Node};
use crate::event::{Handle, Trigger};

pub const EMPTY_STATE_ICON: &str = "📭";
pub const EMPTY_STATE_MESSAGE: &str = "No tasks yet. Add one to get started!";

/// Attribute carrying the element handle
pub const HANDLE_ATTR: &str = "data-handle";
/// Attribute carrying the task id
pub const TASK_ID_ATTR: &str = "data-id";

/// One rendering of the list region
#[derive(Debug, Clone)]
pub struct Projection {
    /// Replaces the list region's children
    pub fragment: Vec<Node>,
    /// Incomplete-task count label
    pub count_label: String,
    /// Handlers for the interactive elements in `fragment`
    pub bindings: BindingTable,
}

impl Projection {
    pub fn to_html(&self) -> String {
        self.fragment.iter().map(Node::to_html).collect()
    }

    pub fn is_empty_state(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Builds projections, handing out handles that are unique for the
/// renderer's lifetime
#[derive(Debug, Default)]
pub struct Renderer {
    next_handle: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project `tasks` (already filtered) and the collection-wide `stats`
    pub fn render(&mut self, tasks: &[&Task], stats: &Stats) -> Projection {
        let mut bindings = Vec::with_capacity(tasks.len() * 2);

        let fragment: Vec<Node> = if tasks.is_empty() {
            vec![empty_state()]
        } else {
            tasks
                .iter()
                .map(|task| Node::from(self.render_row(task, &mut bindings)))
                .collect()
        };

        Projection {
            fragment,
            count_label: render_stats(stats),
            bindings: BindingTable::new(bindings),
        }
    }

    fn render_row(&mut self, task: &Task, bindings: &mut Vec<Binding>) -> Element {
        let toggle = self.bind(bindings, task, RowAction::Toggle, Trigger::Change);
        let delete = self.bind(bindings, task, RowAction::Delete, Trigger::Click);

        Element::new("li")
            .class("todo-item")
            .class_if(task.completed, "completed")
            .child(
                Element::new("input")
                    .attr("type", "checkbox")
                    .class("todo-checkbox")
                    .flag(task.completed, "checked")
                    .attr(TASK_ID_ATTR, task.id)
                    .attr(HANDLE_ATTR, toggle),
            )
            .child(Element::new("span").class("todo-text").text(&task.text))
            .child(
                Element::new("button")
                    .class("delete-btn")
                    .attr(TASK_ID_ATTR, task.id)
                    .attr(HANDLE_ATTR, delete)
                    .text("Delete"),
            )
    }

    fn bind(
        &mut self,
        bindings: &mut Vec<Binding>,
        task: &Task,
        action: RowAction,
        trigger: Trigger,
    ) -> Handle {
        let handle = Handle(self.next_handle);
        self.next_handle += 1;
        bindings.push(Binding {
            handle,
            task_id: task.id,
            action,
            trigger,
        });
        handle
    }
}

/// Placeholder shown when the filtered list is empty
pub fn empty_state() -> Node {
    Element::new("div")
        .class("empty-state")
        .child(Element::new("div").class("empty-state-icon").text(EMPTY_STATE_ICON))
        .child(Element::new("p").text(EMPTY_STATE_MESSAGE))
        .into()
}

/// Incomplete-task count with singular/plural wording
pub fn render_stats(stats: &Stats) -> String {
    stats.label()
}
