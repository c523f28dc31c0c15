//! DOM-backed surface

use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use todo_core::Filter;

use crate::dom::Node;
use crate::surface::Surface;

pub const INPUT_ID: &str = "todoInput";
pub const ADD_BUTTON_ID: &str = "addBtn";
pub const LIST_ID: &str = "todoList";
pub const COUNT_ID: &str = "taskCount";
pub const CLEAR_BUTTON_ID: &str = "clearBtn";
pub const WARNING_ID: &str = "persistenceWarning";
pub const FILTER_SELECTOR: &str = ".filter-btn";

pub struct WebSurface {
    document: Document,
    input: HtmlInputElement,
    list: Element,
    count: Element,
    filters: Vec<(Filter, Element)>,
    warning: Option<Element>,
}

impl WebSurface {
    /// Look up the page's controls
    pub fn attach(document: &Document) -> Result<Self, JsValue> {
        let input = element_by_id(document, INPUT_ID)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| format!("#{INPUT_ID} is not an input"))?;
        let list = element_by_id(document, LIST_ID)?;
        let count = element_by_id(document, COUNT_ID)?;

        Ok(Self {
            document: document.clone(),
            input,
            list,
            count,
            filters: filter_controls(document)?,
            warning: document.get_element_by_id(WARNING_ID),
        })
    }

    pub fn filter_controls(&self) -> &[(Filter, Element)] {
        &self.filters
    }

    fn build(&self, node: &Node) -> Result<web_sys::Node, JsValue> {
        match node {
            Node::Text(text) => Ok(self.document.create_text_node(text).into()),
            Node::Element(e) => {
                let element = self.document.create_element(e.tag)?;
                if !e.classes.is_empty() {
                    element.set_class_name(&e.classes.join(" "));
                }
                for (name, value) in &e.attrs {
                    element.set_attribute(name, value)?;
                }
                for child in &e.children {
                    element.append_child(&self.build(child)?)?;
                }
                Ok(element.into())
            }
        }
    }
}

impl Surface for WebSurface {
    fn mount_list(&mut self, fragment: &[Node]) {
        self.list.set_text_content(None);
        for node in fragment {
            let mounted = self
                .build(node)
                .and_then(|built| self.list.append_child(&built));
            if let Err(e) = mounted {
                warn!("Failed to mount list row: {:?}", e);
            }
        }
    }

    fn set_task_count(&mut self, label: &str) {
        self.count.set_text_content(Some(label));
    }

    fn set_active_filter(&mut self, filter: Filter) {
        for (control, element) in &self.filters {
            let classes = element.class_list();
            let result = if *control == filter {
                classes.add_1("active")
            } else {
                classes.remove_1("active")
            };
            if let Err(e) = result {
                warn!("Failed to update filter control: {:?}", e);
            }
        }
    }

    fn input_value(&self) -> String {
        self.input.value()
    }

    fn clear_input(&mut self) {
        self.input.set_value("");
    }

    fn show_warning(&mut self, message: Option<&str>) {
        if let Some(slot) = &self.warning {
            slot.set_text_content(message);
            let result = if message.is_some() {
                slot.remove_attribute("hidden")
            } else {
                slot.set_attribute("hidden", "")
            };
            if let Err(e) = result {
                warn!("Failed to update warning: {:?}", e);
            }
        }
    }
}

pub(crate) fn element_by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Element '#{id}' not found")))
}

/// Every `.filter-btn`, keyed by its `data-filter` value
fn filter_controls(document: &Document) -> Result<Vec<(Filter, Element)>, JsValue> {
    let nodes = document.query_selector_all(FILTER_SELECTOR)?;
    let mut controls = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(filter) = element
            .get_attribute("data-filter")
            .and_then(|raw| raw.parse::<Filter>().ok())
        else {
            warn!("Skipping filter control without a valid data-filter");
            continue;
        };
        controls.push((filter, element));
    }
    for filter in Filter::ALL {
        if !controls.iter().any(|(control, _)| *control == filter) {
            warn!("No control for the {} filter", filter);
        }
    }
    Ok(controls)
}
