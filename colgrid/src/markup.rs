//! Attribute names of the host markup contract.
//!
//! The server-rendered tree carries these; the engine reads them at attach
//! time and writes the presentation/state attributes while running.

/// Marks a container the engine should attach to.
pub const CONTAINER: &str = "data-column-chooser";
/// Set by the engine on a container once attached.
pub const CONTAINER_INITIALIZED: &str = "data-column-chooser-initialized";
/// The control that opens/closes the panel.
pub const TOGGLE: &str = "data-column-chooser-toggle";
/// Human-readable panel title on the container.
pub const CHOOSER_LABEL: &str = "data-chooser-label";
/// Storage key for the order/visibility record.
pub const STORAGE_KEY: &str = "data-storage-key";
/// Storage key for the widths record.
pub const WIDTHS_STORAGE_KEY: &str = "data-widths-storage-key";

/// The table element inside a container.
pub const TABLE: &str = "data-table";
/// The table's header row.
pub const HEADER_ROW: &str = "data-header-row";
/// A body row.
pub const BODY_ROW: &str = "data-body-row";
/// Toolbar area the panel mounts into.
pub const TOOLBAR: &str = "data-table-toolbar";
/// Table wrapper; the panel is inserted before it when no toolbar exists.
pub const WRAPPER: &str = "data-table-wrapper";

/// Stable column key on header and body cells.
pub const COLUMN_KEY: &str = "data-column-key";
/// Display label override on a header cell.
pub const COLUMN_LABEL: &str = "data-column-label";
/// "true" when the column can never be hidden or reordered.
pub const COLUMN_REQUIRED: &str = "data-column-required";
/// "true" when an optional column starts hidden.
pub const COLUMN_DEFAULT_HIDDEN: &str = "data-column-default-hidden";
/// Per-column resize floor in pixels.
pub const COLUMN_MIN_WIDTH: &str = "data-column-min-width";
/// Presentation attribute marking a hidden cell.
pub const COLUMN_HIDDEN: &str = "data-column-hidden";

/// Sort-state decoration on header cells.
pub const ARIA_SORT: &str = "aria-sort";
pub const SORT_ORDER: &str = "data-sort-order";

/// Panel list item for a required column.
pub const REQUIRED_ITEM: &str = "data-required";
/// Transient marker on the list item under a drag pointer.
pub const DRAG_OVER: &str = "data-drag-over";
/// Injected header resize handle; the value is the column key.
pub const RESIZE_HANDLE: &str = "data-resize-handle";
/// Set on the container while a resize session is live.
pub const RESIZING: &str = "data-resizing";

pub const ROLE: &str = "role";
pub const ARIA_LABEL: &str = "aria-label";
pub const ARIA_EXPANDED: &str = "aria-expanded";
pub const ARIA_CONTROLS: &str = "aria-controls";
