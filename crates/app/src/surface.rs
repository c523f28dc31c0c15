//! Display surface
//!
//! The page the controller draws on: a text input, the list region, the
//! running count label, the filter controls and a warning slot.

use todo_core::Filter;

use crate::dom::Node;

pub trait Surface {
    /// Replace the list region's children with `fragment`
    fn mount_list(&mut self, fragment: &[Node]);

    fn set_task_count(&mut self, label: &str);

    /// Mark exactly `filter`'s control as active
    fn set_active_filter(&mut self, filter: Filter);

    /// Current content of the text input
    fn input_value(&self) -> String;

    fn clear_input(&mut self);

    /// Show or clear a non-blocking warning
    fn show_warning(&mut self, message: Option<&str>);
}

/// In-memory surface for tests and hosts without a DOM
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    pub input: String,
    pub list: Vec<Node>,
    pub count_label: String,
    pub active_filter: Filter,
    pub warning: Option<String>,
    /// Number of times the list region was replaced
    pub mounts: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type into the text input, replacing its content
    pub fn type_text(&mut self, text: &str) {
        self.input = text.to_string();
    }

    pub fn list_html(&self) -> String {
        self.list.iter().map(Node::to_html).collect()
    }

    /// Text of every displayed task, top to bottom
    pub fn task_texts(&self) -> Vec<String> {
        self.list
            .iter()
            .flat_map(|n| n.by_class("todo-text"))
            .map(|e| Node::Element(e.clone()).text_content())
            .collect()
    }
}

impl Surface for HeadlessSurface {
    fn mount_list(&mut self, fragment: &[Node]) {
        self.list = fragment.to_vec();
        self.mounts += 1;
    }

    fn set_task_count(&mut self, label: &str) {
        self.count_label = label.to_string();
    }

    fn set_active_filter(&mut self, filter: Filter) {
        self.active_filter = filter;
    }

    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn show_warning(&mut self, message: Option<&str>) {
        self.warning = message.map(str::to_string);
    }
}
