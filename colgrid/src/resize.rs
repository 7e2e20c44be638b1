//! Pointer-drag resizing of one column from its header handle.
//!
//! Width feedback is applied live on every move; the store is only
//! touched on release. `finish` is the single exit path and runs the
//! same teardown for pointer-up, pointer-cancel, and window blur, so an
//! interrupted gesture never leaves the table in resizing mode.

use tabledom::{Element, Geometry, find_by_attr, find_element, find_element_mut};

use crate::markup;
use crate::render::apply_width;

/// Fixed floor when a header cell names no minimum of its own.
pub const MIN_COLUMN_WIDTH: f64 = 60.0;

/// A live resize gesture on one column.
#[derive(Debug)]
pub struct ResizeSession {
    key: String,
    start_x: f64,
    start_width: f64,
    min_width: f64,
    width: f64,
}

impl ResizeSession {
    /// Start a resize from a pointer-down on a header resize handle.
    ///
    /// Records the starting pointer x and the header cell's current
    /// rendered width (geometry, else the explicit width style, else the
    /// floor), and puts the container into resizing mode.
    pub fn begin(
        document: &mut Element,
        geometry: &Geometry,
        container_id: &str,
        table_id: &str,
        handle_id: &str,
        x: f64,
    ) -> Option<Self> {
        let handle = find_element(document, handle_id)?;
        let key = handle.get_attr(markup::RESIZE_HANDLE)?.to_string();

        let table = find_element(document, table_id)?;
        let cell = find_by_attr(table, markup::COLUMN_KEY, &key)?;
        let min_width = cell
            .get_attr(markup::COLUMN_MIN_WIDTH)
            .and_then(|raw| raw.parse::<f64>().ok())
            .filter(|min| min.is_finite() && *min > 0.0)
            .unwrap_or(MIN_COLUMN_WIDTH);
        let start_width = geometry
            .get(&cell.id)
            .map(|rect| rect.width)
            .or(cell.width)
            .unwrap_or(min_width)
            .max(min_width);

        if let Some(container) = find_element_mut(document, container_id) {
            container.set_attr(markup::RESIZING, "true");
        }

        log::debug!("[resize] start on {key} at x={x} width={start_width}");
        Some(Self {
            key,
            start_x: x,
            start_width,
            min_width,
            width: start_width,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current clamped width of the gesture.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Pointer moved: clamp to the floor and apply live, without
    /// persisting (a gesture produces one store write, on release).
    pub fn on_move(&mut self, document: &mut Element, table_id: &str, x: f64) {
        let width = (self.start_width + (x - self.start_x)).max(self.min_width);
        if width == self.width {
            return;
        }
        self.width = width;
        if let Some(table) = find_element_mut(document, table_id) {
            apply_width(table, &self.key, Some(width));
        }
    }

    /// End the gesture: leave resizing mode and hand the final width to
    /// the caller for persistence. Runs identically for pointer-up,
    /// pointer-cancel, and window blur.
    pub fn finish(self, document: &mut Element, container_id: &str) -> (String, f64) {
        if let Some(container) = find_element_mut(document, container_id) {
            container.remove_attr(markup::RESIZING);
        }
        log::debug!("[resize] end on {} width={}", self.key, self.width);
        (self.key, self.width)
    }

    /// Tear down without reporting a width (reset path).
    pub fn abort(self, document: &mut Element, container_id: &str) {
        if let Some(container) = find_element_mut(document, container_id) {
            container.remove_attr(markup::RESIZING);
        }
        log::debug!("[resize] aborted on {}", self.key);
    }
}
