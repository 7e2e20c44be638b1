//! Engine orchestration: one instance per table container.
//!
//! Control flow per user action: controller/handler mutates the
//! preference state, the resolver recomputes effective order/visibility,
//! the renderer applies it to the live table, and the adapter persists.

use std::collections::HashMap;

use tabledom::{
    Element, Event, FocusState, Geometry, Key, collect_ids_with_attr, contains_id, find_element,
    find_element_mut, find_with_attr, find_with_attr_mut,
};

use crate::markup;
use crate::panel::Panel;
use crate::prefs::{PrefStore, PreferenceState};
use crate::registry::{ColumnRegistry, collect_columns};
use crate::render::{apply_order, apply_visibility, apply_width};
use crate::reorder::DragSession;
use crate::resize::ResizeSession;
use crate::resolve::{SavedDecorations, effective_full_order, effective_optional_order, is_visible};
use crate::store::StoreHandle;

const DEFAULT_LABEL: &str = "Choose columns";

/// The one interaction session an engine may have live. Drag and resize
/// are mutually exclusive by construction.
#[derive(Debug, Default)]
enum Session {
    #[default]
    Idle,
    Drag(DragSession),
    Resize(ResizeSession),
}

/// Column customization engine for one table container.
#[derive(Debug)]
pub struct ColumnEngine {
    container_id: String,
    table_id: String,
    toggle_id: String,
    registry: ColumnRegistry,
    store: PrefStore,
    state: PreferenceState,
    widths: HashMap<String, f64>,
    decorations: SavedDecorations,
    panel: Panel,
    session: Session,
}

impl ColumnEngine {
    /// Attach to a container: derive the catalog, load persisted state,
    /// build the panel, inject resize handles, and apply everything.
    ///
    /// Returns None — with no partial side effects — when the container
    /// is missing its table, its toggle, or any keyed header cell, or
    /// when it is already initialized.
    pub fn attach(
        document: &mut Element,
        container_id: &str,
        store: &StoreHandle,
    ) -> Option<Self> {
        let container = find_element(document, container_id)?;
        if !container.has_attr(markup::CONTAINER)
            || container.has_attr(markup::CONTAINER_INITIALIZED)
        {
            return None;
        }

        let table = find_with_attr(container, markup::TABLE)?;
        let table_id = table.id.clone();
        let toggle_id = find_with_attr(container, markup::TOGGLE)?.id.clone();

        let columns = collect_columns(table);
        if columns.is_empty() {
            log::debug!("[engine] no keyed header cells in {container_id}; not attaching");
            return None;
        }
        let registry = ColumnRegistry::new(columns);

        let label = container
            .get_attr(markup::CHOOSER_LABEL)
            .unwrap_or(DEFAULT_LABEL)
            .to_string();
        let prefs_key = non_empty(container.get_attr(markup::STORAGE_KEY));
        let widths_key = non_empty(container.get_attr(markup::WIDTHS_STORAGE_KEY));
        let store = PrefStore::new(store.clone(), prefs_key, widths_key);

        let state = store.load_preferences(&registry);
        let widths = store.load_widths(&registry);

        let container = find_element_mut(document, container_id)?;
        let panel = Panel::build(container, &registry, &label);

        let mut engine = Self {
            container_id: container_id.to_string(),
            table_id,
            toggle_id,
            registry,
            store,
            state,
            widths,
            decorations: SavedDecorations::new(),
            panel,
            session: Session::Idle,
        };

        if let Some(toggle) = find_element_mut(document, &engine.toggle_id) {
            toggle.set_attr(markup::ARIA_CONTROLS, engine.panel.panel_id());
            toggle.set_attr(markup::ARIA_EXPANDED, "false");
        }
        if let Some(table) = find_element_mut(document, &engine.table_id) {
            inject_resize_handles(table, container_id);
        }

        engine
            .panel
            .sync_list_to_state(document, &engine.registry, &engine.state);
        engine.apply_state(document);
        if let Some(table) = find_element_mut(document, &engine.table_id) {
            for (key, width) in &engine.widths {
                apply_width(table, key, Some(*width));
            }
        }

        if let Some(container) = find_element_mut(document, container_id) {
            container.set_attr(markup::CONTAINER_INITIALIZED, "true");
        }
        log::debug!(
            "[engine] attached to {container_id} with {} columns",
            engine.registry.columns().len()
        );
        Some(engine)
    }

    /// Attach to every un-initialized chooser container in the document.
    pub fn attach_all(document: &mut Element, store: &StoreHandle) -> Vec<Self> {
        collect_ids_with_attr(document, markup::CONTAINER)
            .iter()
            .filter_map(|id| Self::attach(document, id, store))
            .collect()
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    pub fn state(&self) -> &PreferenceState {
        &self.state
    }

    pub fn widths(&self) -> &HashMap<String, f64> {
        &self.widths
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// The order currently rendered.
    pub fn effective_order(&self) -> Vec<String> {
        effective_full_order(&self.registry, &self.state)
    }

    /// Whether a drag or resize gesture is live.
    pub fn session_active(&self) -> bool {
        !matches!(self.session, Session::Idle)
    }

    /// Route one host event through the engine.
    pub fn handle_event(
        &mut self,
        document: &mut Element,
        geometry: &Geometry,
        focus: &mut FocusState,
        event: &Event,
    ) {
        match event {
            Event::Click { target, .. } => self.on_click(document, focus, target.as_deref()),

            Event::Key {
                key: Key::Escape, ..
            } => {
                if self.panel.is_open() {
                    self.close_panel(document, focus);
                }
            }
            Event::Key { .. } => {}

            Event::DragStart { target } => self.on_drag_start(target),
            Event::DragOver { target, .. } => {
                if let Session::Drag(drag) = &self.session {
                    drag.on_drag_over(document, &self.panel, target.as_deref());
                }
            }
            Event::DragLeave { target } => {
                if let Session::Drag(drag) = &self.session {
                    drag.on_drag_leave(document, &self.panel, target);
                }
            }
            Event::Drop { target } => self.on_drop(document, target.as_deref()),
            Event::DragEnd => self.end_drag(document),

            Event::PointerDown {
                target: Some(target),
                x,
                ..
            } => self.on_pointer_down(document, geometry, target, *x),
            Event::PointerDown { .. } => {}
            Event::PointerMove { x, .. } => {
                if let Session::Resize(resize) = &mut self.session {
                    resize.on_move(document, &self.table_id, *x);
                }
            }
            Event::PointerUp { .. } | Event::PointerCancel => self.end_resize(document),

            Event::WindowBlur => {
                // An interrupted gesture is a normal release, not an error.
                self.end_drag(document);
                self.end_resize(document);
            }
        }
    }

    /// Re-run resolve → render → control sync against the current state.
    pub fn apply_state(&mut self, document: &mut Element) {
        let order = effective_full_order(&self.registry, &self.state);
        if let Some(table) = find_element_mut(document, &self.table_id) {
            apply_order(table, &order);
            for column in self.registry.columns() {
                let visible = is_visible(column, &self.state);
                apply_visibility(table, &mut self.decorations, &column.key, visible);
            }
        }
        self.panel
            .update_control_states(document, &self.registry, &self.state);
    }

    /// Clear both persisted records and return to catalog defaults.
    pub fn reset(&mut self, document: &mut Element) {
        if matches!(self.session, Session::Resize(_))
            && let Session::Resize(resize) = std::mem::take(&mut self.session)
        {
            resize.abort(document, &self.container_id);
        }

        self.store.clear();
        self.state = PreferenceState::defaults(&self.registry);
        self.widths.clear();

        if let Some(table) = find_element_mut(document, &self.table_id) {
            for column in self.registry.columns() {
                apply_width(table, &column.key, None);
            }
        }
        self.panel
            .sync_list_to_state(document, &self.registry, &self.state);
        self.apply_state(document);
        log::debug!("[engine] reset {}", self.container_id);
    }

    /// Move an optional column one step left or right.
    pub fn move_column(&mut self, document: &mut Element, key: &str, delta: i32) {
        let mut optional = effective_optional_order(&self.registry, &self.state.order);
        let Some(index) = optional.iter().position(|k| k == key) else {
            return;
        };
        let new_index = index as i32 + delta;
        if new_index < 0 || new_index >= optional.len() as i32 {
            return;
        }
        let moved = optional.remove(index);
        optional.insert(new_index as usize, moved);
        self.state.order = optional;

        self.panel
            .sync_list_to_state(document, &self.registry, &self.state);
        self.apply_state(document);
        self.store.save_preferences(&self.registry, &self.state);
    }

    fn on_click(&mut self, document: &mut Element, focus: &mut FocusState, target: Option<&str>) {
        // Outside-click close; active only while the panel is open. The
        // toggle is excluded so its own click can toggle instead.
        if self.panel.is_open() {
            let inside = target.is_some_and(|t| {
                find_element(document, self.panel.panel_id()).is_some_and(|p| contains_id(p, t))
                    || find_element(document, &self.toggle_id)
                        .is_some_and(|toggle| contains_id(toggle, t))
            });
            if !inside {
                self.close_panel(document, focus);
                return;
            }
        }

        let Some(target) = target else {
            return;
        };

        let on_toggle = find_element(document, &self.toggle_id)
            .is_some_and(|toggle| toggle.id == target || contains_id(toggle, target));
        if on_toggle {
            if self.panel.is_open() {
                self.close_panel(document, focus);
            } else {
                self.open_panel(document, focus);
            }
            return;
        }

        if target == self.panel.close_id() {
            self.close_panel(document, focus);
            return;
        }
        if target == self.panel.reset_id() {
            self.reset(document);
            return;
        }
        if let Some(key) = self.panel.column_for_checkbox(target).map(str::to_string) {
            self.on_checkbox_toggle(document, &key);
            return;
        }
        if let Some((key, delta)) = self
            .panel
            .move_button(target)
            .map(|(key, delta)| (key.to_string(), delta))
        {
            self.move_column(document, &key, delta);
        }
    }

    fn on_checkbox_toggle(&mut self, document: &mut Element, key: &str) {
        // Required checkboxes are disabled and unclickable; the guard is
        // the invariant, not the UI.
        if !self.registry.is_optional(key) {
            return;
        }
        let Some(checkbox_id) = self
            .panel
            .controls_for(key)
            .map(|control| control.checkbox_id.clone())
        else {
            return;
        };
        let visible = match find_element_mut(document, &checkbox_id) {
            Some(checkbox) => {
                let visible = !checkbox.is_checked();
                checkbox.set_checked(visible);
                visible
            }
            None => return,
        };

        if visible {
            self.state.hidden.remove(key);
        } else {
            self.state.hidden.insert(key.to_string());
        }
        self.apply_state(document);
        self.store.save_preferences(&self.registry, &self.state);
    }

    fn on_drag_start(&mut self, target: &str) {
        if !matches!(self.session, Session::Idle) {
            log::debug!("[engine] ignoring drag start during active session");
            return;
        }
        if let Some(drag) = DragSession::begin(&self.panel, &self.registry, target) {
            self.session = Session::Drag(drag);
        }
    }

    fn on_drop(&mut self, document: &mut Element, target: Option<&str>) {
        let changed = match &self.session {
            Session::Drag(drag) => drag.on_drop(document, &self.panel, target),
            _ => return,
        };
        if changed {
            self.update_state_from_list(document);
        }
    }

    fn end_drag(&mut self, document: &mut Element) {
        if matches!(self.session, Session::Drag(_))
            && let Session::Drag(drag) = std::mem::take(&mut self.session)
        {
            drag.finish(document, &self.panel);
        }
    }

    fn on_pointer_down(
        &mut self,
        document: &mut Element,
        geometry: &Geometry,
        target: &str,
        x: f64,
    ) {
        let is_handle =
            find_element(document, target).is_some_and(|el| el.has_attr(markup::RESIZE_HANDLE));
        if !is_handle {
            return;
        }
        if !matches!(self.session, Session::Idle) {
            log::debug!("[engine] ignoring resize start during active session");
            return;
        }
        if let Some(resize) = ResizeSession::begin(
            document,
            geometry,
            &self.container_id,
            &self.table_id,
            target,
            x,
        ) {
            self.session = Session::Resize(resize);
        }
    }

    fn end_resize(&mut self, document: &mut Element) {
        if matches!(self.session, Session::Resize(_))
            && let Session::Resize(resize) = std::mem::take(&mut self.session)
        {
            let (key, width) = resize.finish(document, &self.container_id);
            self.widths.insert(key, width);
            self.store.save_widths(&self.registry, &self.widths);
        }
    }

    fn update_state_from_list(&mut self, document: &mut Element) {
        self.state.order = self.panel.optional_order_from_list(document);
        self.apply_state(document);
        self.store.save_preferences(&self.registry, &self.state);
    }

    fn open_panel(&mut self, document: &mut Element, focus: &mut FocusState) {
        self.panel.open(document, focus, &self.toggle_id);
    }

    fn close_panel(&mut self, document: &mut Element, focus: &mut FocusState) {
        self.panel.close(document, focus, &self.toggle_id);
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn inject_resize_handles(table: &mut Element, container_id: &str) {
    let Some(header_row) = find_with_attr_mut(table, markup::HEADER_ROW) else {
        return;
    };
    let Some(cells) = header_row.children_mut() else {
        return;
    };
    for cell in cells {
        let Some(key) = cell.get_attr(markup::COLUMN_KEY).map(str::to_string) else {
            continue;
        };
        let already = cell
            .children_ref()
            .iter()
            .any(|child| child.has_attr(markup::RESIZE_HANDLE));
        if already {
            continue;
        }
        cell.push_child(
            Element::box_()
                .id(format!("{container_id}-resize-{key}"))
                .attr(markup::RESIZE_HANDLE, key)
                .clickable(true),
        );
    }
}
