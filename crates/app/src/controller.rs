//! Event wiring
//!
//! The controller owns the app state and turns interaction events into task
//! list mutations, saves, and re-renders. Every state change is followed by
//! a full save and a full render; a failed save degrades to an in-memory
//! session with a warning instead of stopping the app.

use tracing::{debug, info, warn};

use todo_core::{Filter, KeyValueStore, Stats, Task, TaskId, TaskList, TaskPersistence};

use crate::event::{Handle, Trigger, UiEvent};
use crate::surface::Surface;
use crate::view::{BindingTable, Renderer, RowAction};

pub const PERSISTENCE_WARNING: &str =
    "Changes could not be saved and will be lost when this page is closed.";

pub struct Controller<S, V> {
    tasks: TaskList,
    filter: Filter,
    persistence: TaskPersistence<S>,
    surface: V,
    renderer: Renderer,
    bindings: BindingTable,
    degraded: bool,
}

impl<S: KeyValueStore, V: Surface> Controller<S, V> {
    /// Load the stored tasks and draw the initial view
    pub fn new(persistence: TaskPersistence<S>, surface: V) -> Self {
        let tasks = TaskList::from_tasks(persistence.load());
        info!(count = tasks.len(), "Starting todo app");

        let mut controller = Self {
            tasks,
            filter: Filter::default(),
            persistence,
            surface,
            renderer: Renderer::new(),
            bindings: BindingTable::default(),
            degraded: false,
        };
        controller.surface.set_active_filter(controller.filter);
        controller.render();
        controller
    }

    pub fn handle(&mut self, event: UiEvent) {
        debug!(?event, "Handling event");
        match event {
            UiEvent::AddClicked => self.add_from_input(),
            UiEvent::KeyPress { key } if key == "Enter" => self.add_from_input(),
            UiEvent::KeyPress { .. } => {}
            UiEvent::ClearCompletedClicked => self.clear_completed(),
            UiEvent::FilterSelected(filter) => self.set_filter(filter),
            UiEvent::Element { handle, trigger } => self.dispatch(handle, trigger),
        }
    }

    /// Add the input's text as a task; the input is cleared only when a
    /// task was actually added
    pub fn add_from_input(&mut self) {
        let text = self.surface.input_value();
        if self.add(&text).is_some() {
            self.surface.clear_input();
        }
    }

    pub fn add(&mut self, text: &str) -> Option<TaskId> {
        let id = self.tasks.add(text)?;
        self.commit();
        Some(id)
    }

    /// Delete `id`; saves and re-renders even when nothing matched
    pub fn delete(&mut self, id: TaskId) {
        self.tasks.delete(id);
        self.commit();
    }

    /// Toggle `id`; a missing id changes nothing and draws nothing
    pub fn toggle(&mut self, id: TaskId) {
        if self.tasks.toggle(id) {
            self.commit();
        }
    }

    pub fn clear_completed(&mut self) {
        self.tasks.clear_completed();
        self.commit();
    }

    /// Switch the displayed subset; the filter is not persisted
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.surface.set_active_filter(filter);
        self.render();
    }

    fn dispatch(&mut self, handle: Handle, trigger: Trigger) {
        let Some(binding) = self.bindings.resolve(handle, trigger).copied() else {
            debug!(%handle, ?trigger, "Ignoring event from unbound element");
            return;
        };
        match binding.action {
            RowAction::Toggle => self.toggle(binding.task_id),
            RowAction::Delete => self.delete(binding.task_id),
        }
    }

    fn commit(&mut self) {
        self.persist();
        self.render();
    }

    fn persist(&mut self) {
        match self.persistence.save(self.tasks.as_slice()) {
            Ok(()) => {
                if self.degraded {
                    info!("Task persistence recovered");
                    self.degraded = false;
                    self.surface.show_warning(None);
                }
            }
            Err(e) => {
                warn!("Failed to save tasks, keeping them in memory: {}", e);
                self.degraded = true;
                self.surface.show_warning(Some(PERSISTENCE_WARNING));
            }
        }
    }

    /// Redraw the list and count from the current state
    pub fn render(&mut self) {
        let visible = self.tasks.filtered(self.filter);
        let projection = self.renderer.render(&visible, &self.tasks.stats());

        self.surface.mount_list(&projection.fragment);
        self.surface.set_task_count(&projection.count_label);
        self.bindings = projection.bindings;
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.as_slice()
    }

    pub fn stats(&self) -> Stats {
        self.tasks.stats()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Whether the last save failed
    pub fn persistence_degraded(&self) -> bool {
        self.degraded
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut V {
        &mut self.surface
    }

    pub fn persistence(&self) -> &TaskPersistence<S> {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut TaskPersistence<S> {
        &mut self.persistence
    }
}
