//! Per-table column customization: visibility, order, and pixel widths,
//! persisted per table and applied to a live `tabledom` element tree.
//!
//! One [`ColumnEngine`] attaches per chooser container; everything it
//! touches — the table, the floating panel, the preference store — stays
//! behind explicit seams so hosts and tests drive it the same way.

pub mod engine;
pub mod markup;
pub mod panel;
pub mod prefs;
pub mod registry;
pub mod render;
pub mod reorder;
pub mod resize;
pub mod resolve;
pub mod store;

pub use engine::ColumnEngine;
pub use panel::{ColumnControls, Panel};
pub use prefs::{PrefStore, PreferenceState};
pub use registry::{Column, ColumnRegistry, collect_columns};
pub use render::{apply_order, apply_visibility, apply_width};
pub use reorder::DragSession;
pub use resize::{MIN_COLUMN_WIDTH, ResizeSession};
pub use resolve::{
    SavedDecorations, SortDecoration, effective_full_order, effective_optional_order, is_visible,
};
pub use store::{MemoryBackend, SqliteBackend, StoreBackend, StoreError, StoreHandle, probe};
