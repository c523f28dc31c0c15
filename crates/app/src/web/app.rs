//! WASM application entry point.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, Event, EventTarget, KeyboardEvent};

use todo_core::storage::MemoryStorage;
use todo_core::{KeyValueStore, TaskPersistence, TodoConfig};

use super::logging;
use super::storage::LocalStorage;
use super::surface::{element_by_id, WebSurface, ADD_BUTTON_ID, CLEAR_BUTTON_ID, INPUT_ID, LIST_ID};
use crate::controller::Controller;
use crate::event::{Trigger, UiEvent};
use crate::view::HANDLE_ATTR;

type WebController = Controller<Box<dyn KeyValueStore>, WebSurface>;

/// A DOM listener that is removed again when dropped
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// The running app, mounted on the current document.
///
/// Construct it once the DOM is ready:
///
/// ```js
/// document.addEventListener("DOMContentLoaded", () => { window.app = new TodoApp(); });
/// ```
#[wasm_bindgen]
pub struct TodoApp {
    controller: Rc<RefCell<WebController>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl TodoApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<TodoApp, JsValue> {
        Self::mount(TodoConfig::default())
    }

    /// Mount with the collection stored under `key` instead of `todos`
    #[wasm_bindgen(js_name = withStorageKey)]
    pub fn with_storage_key(key: &str) -> Result<TodoApp, JsValue> {
        if key.trim().is_empty() {
            return Err(JsValue::from_str("Storage key must not be empty"));
        }
        Self::mount(TodoConfig {
            storage_key: key.trim().to_string(),
            ..TodoConfig::default()
        })
    }

    /// Number of stored tasks
    #[wasm_bindgen(js_name = taskCount)]
    pub fn task_count(&self) -> usize {
        self.controller.borrow().tasks().len()
    }

    /// Tasks as the JSON array that is persisted
    #[wasm_bindgen(js_name = tasksJson)]
    pub fn tasks_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.controller.borrow().tasks())
            .map_err(|e| JsValue::from_str(&format!("JSON error: {}", e)))
    }
}

impl TodoApp {
    fn mount(config: TodoConfig) -> Result<TodoApp, JsValue> {
        console_error_panic_hook::set_once();
        logging::init();

        let document = window()
            .ok_or("No window")?
            .document()
            .ok_or("No document")?;

        let surface = WebSurface::attach(&document)?;
        let store: Box<dyn KeyValueStore> = match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                warn!("Falling back to session-only storage: {}", e);
                Box::new(MemoryStorage::new())
            }
        };

        let controller = Controller::new(TaskPersistence::with_config(store, &config), surface);
        info!(count = controller.tasks().len(), "Mounted todo app");

        let mut app = Self {
            controller: Rc::new(RefCell::new(controller)),
            listeners: Vec::new(),
        };
        app.bind_events(&document)?;
        Ok(app)
    }

    fn bind_events(&mut self, document: &Document) -> Result<(), JsValue> {
        let add = element_by_id(document, ADD_BUTTON_ID)?;
        self.listen(&add, Trigger::Click.as_str(), |_| Some(UiEvent::AddClicked))?;

        let input = element_by_id(document, INPUT_ID)?;
        self.listen(&input, "keypress", |e| {
            e.dyn_ref::<KeyboardEvent>().map(|k| UiEvent::key(k.key()))
        })?;

        let clear = element_by_id(document, CLEAR_BUTTON_ID)?;
        self.listen(&clear, Trigger::Click.as_str(), |_| Some(UiEvent::ClearCompletedClicked))?;

        let filters: Vec<_> = self
            .controller
            .borrow()
            .surface()
            .filter_controls()
            .to_vec();
        for (filter, element) in filters {
            self.listen(&element, Trigger::Click.as_str(), move |_| {
                Some(UiEvent::FilterSelected(filter))
            })?;
        }

        // Row controls are re-rendered constantly, so their events are taken
        // from the list container and resolved through the current bindings.
        let list = element_by_id(document, LIST_ID)?;
        for trigger in [Trigger::Click, Trigger::Change] {
            self.listen(&list, trigger.as_str(), row_event)?;
        }

        Ok(())
    }

    fn listen<F>(&mut self, target: &EventTarget, event: &'static str, translate: F) -> Result<(), JsValue>
    where
        F: Fn(&Event) -> Option<UiEvent> + 'static,
    {
        let controller = Rc::clone(&self.controller);
        let callback = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
            let Some(ui_event) = translate(&e) else {
                return;
            };
            match controller.try_borrow_mut() {
                Ok(mut controller) => controller.handle(ui_event),
                Err(_) => warn!("Dropping {:?} raised during another event", ui_event),
            }
        });
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target: target.clone(),
            event,
            callback,
        });
        Ok(())
    }
}

/// Resolve a delegated list event to the element handle it came from
fn row_event(event: &Event) -> Option<UiEvent> {
    let trigger = event.type_().parse::<Trigger>().ok()?;
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let handle = target.get_attribute(HANDLE_ATTR)?.parse().ok()?;
    Some(UiEvent::Element { handle, trigger })
}
