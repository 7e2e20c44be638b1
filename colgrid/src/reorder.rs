//! Pointer-drag reordering of optional columns within the panel list.
//!
//! A strict state machine: the session exists only between drag-start
//! and drag-end, and `finish` is the single exit path — every teardown
//! (drop, cancel, window blur) goes through it.

use tabledom::{Element, find_element_mut, move_child};

use crate::markup;
use crate::panel::Panel;
use crate::registry::ColumnRegistry;

/// A live drag gesture over the panel list.
#[derive(Debug)]
pub struct DragSession {
    key: String,
    item_id: String,
}

impl DragSession {
    /// Start a drag from a drag-start target. Only optional list items
    /// are drag sources; anything else yields no session.
    pub fn begin(panel: &Panel, registry: &ColumnRegistry, target: &str) -> Option<Self> {
        let key = panel.column_for_item(target)?;
        if !registry.is_optional(key) {
            return None;
        }
        log::debug!("[reorder] drag start on {key}");
        Some(Self {
            key: key.to_string(),
            item_id: target.to_string(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Mark the optional item currently under the drag pointer.
    pub fn on_drag_over(&self, document: &mut Element, panel: &Panel, target: Option<&str>) {
        let Some(item_id) = target.and_then(|id| panel.item_for_descendant(document, id)) else {
            return;
        };
        if item_id == self.item_id {
            return;
        }
        if let Some(item) = find_element_mut(document, &item_id) {
            if item.has_attr(markup::REQUIRED_ITEM) {
                return;
            }
            item.set_attr(markup::DRAG_OVER, "true");
        }
    }

    /// Unmark an item the drag pointer left.
    pub fn on_drag_leave(&self, document: &mut Element, panel: &Panel, target: &str) {
        if let Some(item_id) = panel.item_for_descendant(document, target)
            && let Some(item) = find_element_mut(document, &item_id)
        {
            item.remove_attr(markup::DRAG_OVER);
        }
    }

    /// Drop on a target item. Returns true when the list order changed
    /// (the caller then reads the new order off the list and persists).
    ///
    /// Insertion side comes from the optional-only subsequence of the
    /// list: a dragged item that currently precedes the target lands
    /// immediately after it, otherwise immediately before. Dropping on a
    /// required item, on itself, or outside any item is a no-op.
    pub fn on_drop(&self, document: &mut Element, panel: &Panel, target: Option<&str>) -> bool {
        let Some(target_item) = target.and_then(|id| panel.item_for_descendant(document, id))
        else {
            return false;
        };
        if target_item == self.item_id {
            return false;
        }

        let Some(list) = find_element_mut(document, panel.list_id()) else {
            return false;
        };

        // Positions within the optional-only subsequence; required items
        // are fixed and never count.
        let optional: Vec<&str> = list
            .children_ref()
            .iter()
            .filter(|item| !item.has_attr(markup::REQUIRED_ITEM))
            .map(|item| item.id.as_str())
            .collect();
        let Some(dragged_index) = optional.iter().position(|id| *id == self.item_id) else {
            return false;
        };
        let Some(target_index) = optional.iter().position(|id| *id == target_item) else {
            return false;
        };

        let after = dragged_index < target_index;
        log::debug!(
            "[reorder] drop {} {} {}",
            self.key,
            if after { "after" } else { "before" },
            target_item
        );
        move_child(list, &self.item_id, &target_item, after)
    }

    /// End the gesture: clear every drag-over marker. Runs on drop and on
    /// every cancellation path alike.
    pub fn finish(self, document: &mut Element, panel: &Panel) {
        if let Some(list) = find_element_mut(document, panel.list_id())
            && let Some(children) = list.children_mut()
        {
            for item in children {
                item.remove_attr(markup::DRAG_OVER);
            }
        }
        log::debug!("[reorder] drag end on {}", self.key);
    }
}
