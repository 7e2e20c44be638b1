//! The floating column chooser panel.
//!
//! Built once per table at attach time and kept in sync with resolved
//! state from then on. List items are reordered, never rebuilt, so item
//! identity survives every customization.

use std::collections::HashMap;

use tabledom::{
    Content, Element, FocusState, collect_focusable, contains_id, find_element, find_element_mut,
    find_with_attr, reorder_children_by_rank,
};

use crate::markup;
use crate::prefs::PreferenceState;
use crate::registry::{Column, ColumnRegistry};
use crate::resolve::{effective_full_order, effective_optional_order, is_visible};

const DEFAULT_HINT: &str =
    "Select columns to show or hide. Drag optional columns to change their order.";

/// IDs of the per-column controls inside the panel list.
#[derive(Debug, Clone)]
pub struct ColumnControls {
    pub item_id: String,
    pub checkbox_id: String,
    pub move_left_id: Option<String>,
    pub move_right_id: Option<String>,
    pub required: bool,
}

/// Handle to a built panel: element IDs, the control map, and the
/// open/focus bookkeeping.
#[derive(Debug)]
pub struct Panel {
    panel_id: String,
    list_id: String,
    close_id: String,
    reset_id: String,
    controls: HashMap<String, ColumnControls>,
    open: bool,
    previous_focus: Option<String>,
}

impl Panel {
    /// Build the panel for a container and mount it: into the toolbar
    /// area when one exists, else directly before the table wrapper,
    /// else appended to the container.
    pub fn build(container: &mut Element, registry: &ColumnRegistry, label: &str) -> Self {
        let panel_id = format!("{}-column-chooser", container.id);
        let list_id = format!("{panel_id}-list");
        let close_id = format!("{panel_id}-close");
        let reset_id = format!("{panel_id}-reset");

        let mut controls = HashMap::new();
        let mut list = Element::box_().id(list_id.clone());
        for column in registry.columns() {
            let (item, item_controls) = create_list_item(&panel_id, column);
            list.push_child(item);
            controls.insert(column.key.clone(), item_controls);
        }

        let header = Element::box_()
            .id(format!("{panel_id}-header"))
            .child(Element::text(label).id(format!("{panel_id}-title")))
            .child(Element::button("Close").id(close_id.clone()));
        let footer = Element::box_()
            .id(format!("{panel_id}-footer"))
            .child(Element::button("Reset to defaults").id(reset_id.clone()));

        let panel = Element::box_()
            .id(panel_id.clone())
            .attr(markup::ROLE, "dialog")
            .attr(markup::ARIA_LABEL, label)
            .hidden(true)
            .child(header)
            .child(Element::text(DEFAULT_HINT).id(format!("{panel_id}-hint")))
            .child(list)
            .child(footer);

        mount_panel(container, panel);

        Self {
            panel_id,
            list_id,
            close_id,
            reset_id,
            controls,
            open: false,
            previous_focus: None,
        }
    }

    pub fn panel_id(&self) -> &str {
        &self.panel_id
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn close_id(&self) -> &str {
        &self.close_id
    }

    pub fn reset_id(&self) -> &str {
        &self.reset_id
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn controls_for(&self, key: &str) -> Option<&ColumnControls> {
        self.controls.get(key)
    }

    /// Column key owning this checkbox ID, if any.
    pub fn column_for_checkbox(&self, id: &str) -> Option<&str> {
        self.controls
            .iter()
            .find(|(_, control)| control.checkbox_id == id)
            .map(|(key, _)| key.as_str())
    }

    /// Column key and direction for a move button ID, if any.
    pub fn move_button(&self, id: &str) -> Option<(&str, i32)> {
        for (key, control) in &self.controls {
            if control.move_left_id.as_deref() == Some(id) {
                return Some((key.as_str(), -1));
            }
            if control.move_right_id.as_deref() == Some(id) {
                return Some((key.as_str(), 1));
            }
        }
        None
    }

    /// Resolve an arbitrary element ID to the list item containing it.
    pub fn item_for_descendant(&self, document: &Element, id: &str) -> Option<String> {
        let list = find_element(document, &self.list_id)?;
        list.children_ref()
            .iter()
            .find(|item| contains_id(item, id))
            .map(|item| item.id.clone())
    }

    /// Column key of a list item ID, if the item is one of ours.
    pub fn column_for_item(&self, id: &str) -> Option<&str> {
        self.controls
            .iter()
            .find(|(_, control)| control.item_id == id)
            .map(|(key, _)| key.as_str())
    }

    /// Optional-column keys read off the list's current child order.
    pub fn optional_order_from_list(&self, document: &Element) -> Vec<String> {
        let Some(list) = find_element(document, &self.list_id) else {
            return Vec::new();
        };
        list.children_ref()
            .iter()
            .filter(|item| !item.has_attr(markup::REQUIRED_ITEM))
            .filter_map(|item| item.get_attr(markup::COLUMN_KEY))
            .map(str::to_string)
            .collect()
    }

    /// Reorder the list's existing items to match the effective full
    /// order.
    pub fn sync_list_to_state(
        &self,
        document: &mut Element,
        registry: &ColumnRegistry,
        state: &PreferenceState,
    ) {
        let order = effective_full_order(registry, state);
        let rank: HashMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(index, key)| (key.as_str(), index))
            .collect();
        if let Some(list) = find_element_mut(document, &self.list_id) {
            reorder_children_by_rank(list, |item| {
                item.get_attr(markup::COLUMN_KEY)
                    .and_then(|key| rank.get(key))
                    .copied()
            });
        }
    }

    /// Resync every checkbox to resolved visibility and the move buttons
    /// to their position limits.
    pub fn update_control_states(
        &self,
        document: &mut Element,
        registry: &ColumnRegistry,
        state: &PreferenceState,
    ) {
        let optional_order = effective_optional_order(registry, &state.order);
        let first = optional_order.first();
        let last = optional_order.last();
        let single = optional_order.len() <= 1;

        for (key, control) in &self.controls {
            let visible = registry
                .get(key)
                .is_some_and(|column| is_visible(column, state));
            if let Some(checkbox) = find_element_mut(document, &control.checkbox_id) {
                checkbox.set_checked(visible);
            }
            if let Some(id) = &control.move_left_id
                && let Some(button) = find_element_mut(document, id)
            {
                button.disabled = single || first.map(String::as_str) == Some(key.as_str());
            }
            if let Some(id) = &control.move_right_id
                && let Some(button) = find_element_mut(document, id)
            {
                button.disabled = single || last.map(String::as_str) == Some(key.as_str());
            }
        }
    }

    /// Open the panel: capture the previously focused element, unhide,
    /// and move focus to the first enabled checkbox (else first control).
    pub fn open(&mut self, document: &mut Element, focus: &mut FocusState, toggle_id: &str) {
        if self.open {
            return;
        }
        self.previous_focus = focus.focused().map(str::to_string);
        self.open = true;

        if let Some(panel) = find_element_mut(document, &self.panel_id) {
            panel.hidden = false;
        }
        if let Some(toggle) = find_element_mut(document, toggle_id) {
            toggle.set_attr(markup::ARIA_EXPANDED, "true");
        }

        if let Some(panel) = find_element(document, &self.panel_id) {
            let focusable = collect_focusable(panel);
            let target = focusable
                .iter()
                .find(|id| {
                    find_element(panel, id.as_str())
                        .is_some_and(|el| matches!(el.content, Content::Checkbox { .. }))
                })
                .or_else(|| focusable.first());
            if let Some(id) = target {
                focus.focus(id);
            }
        }
        log::debug!("[panel] opened {}", self.panel_id);
    }

    /// Close the panel and restore focus to the previously focused
    /// element, falling back to the toggle.
    pub fn close(&mut self, document: &mut Element, focus: &mut FocusState, toggle_id: &str) {
        if !self.open {
            return;
        }
        self.open = false;

        if let Some(panel) = find_element_mut(document, &self.panel_id) {
            panel.hidden = true;
        }
        if let Some(toggle) = find_element_mut(document, toggle_id) {
            toggle.set_attr(markup::ARIA_EXPANDED, "false");
        }

        let restore = self
            .previous_focus
            .take()
            .filter(|id| find_element(document, id).is_some())
            .unwrap_or_else(|| toggle_id.to_string());
        focus.focus(&restore);
        log::debug!("[panel] closed {}", self.panel_id);
    }
}

fn create_list_item(panel_id: &str, column: &Column) -> (Element, ColumnControls) {
    let key = &column.key;
    let item_id = format!("{panel_id}-item-{key}");
    let checkbox_id = format!("{panel_id}-check-{key}");

    let mut item = Element::box_()
        .id(item_id.clone())
        .attr(markup::COLUMN_KEY, key.clone());

    item.push_child(Element::text("≡").id(format!("{panel_id}-grip-{key}")));

    let checkbox = Element::checkbox(true)
        .id(checkbox_id.clone())
        .disabled(column.required);
    item.push_child(checkbox);
    item.push_child(Element::text(column.label.clone()).id(format!("{panel_id}-label-{key}")));

    let mut move_left_id = None;
    let mut move_right_id = None;
    if column.required {
        item.set_attr(markup::REQUIRED_ITEM, "true");
    } else {
        item.draggable = true;

        let left_id = format!("{panel_id}-left-{key}");
        let right_id = format!("{panel_id}-right-{key}");
        let moves = Element::box_()
            .id(format!("{panel_id}-moves-{key}"))
            .child(
                Element::button("←")
                    .id(left_id.clone())
                    .attr(markup::ARIA_LABEL, format!("Move {} left", column.label)),
            )
            .child(
                Element::button("→")
                    .id(right_id.clone())
                    .attr(markup::ARIA_LABEL, format!("Move {} right", column.label)),
            );
        item.push_child(moves);
        move_left_id = Some(left_id);
        move_right_id = Some(right_id);
    }

    let controls = ColumnControls {
        item_id,
        checkbox_id,
        move_left_id,
        move_right_id,
        required: column.required,
    };
    (item, controls)
}

fn mount_panel(container: &mut Element, panel: Element) {
    if let Some(toolbar_id) = find_with_attr(container, markup::TOOLBAR).map(|el| el.id.clone()) {
        if let Some(toolbar) = find_element_mut(container, &toolbar_id) {
            toolbar.push_child(panel);
            return;
        }
    }
    if let Some(wrapper_id) = container
        .children_ref()
        .iter()
        .find(|child| child.has_attr(markup::WRAPPER))
        .map(|child| child.id.clone())
    {
        container.insert_child_before(panel, &wrapper_id);
        return;
    }
    container.push_child(panel);
}
