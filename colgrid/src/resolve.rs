//! Effective order and visibility, computed from stored preferences
//! merged with catalog defaults. Pure over the registry and state; the
//! only mutable piece here is the sort-decoration side table.

use std::collections::HashMap;

use crate::prefs::PreferenceState;
use crate::registry::{Column, ColumnRegistry};

/// Resolve the optional-column order: the override filtered to valid
/// optional keys (duplicates dropped, relative order preserved), then
/// every optional key not yet present appended in catalog order. Every
/// optional column appears exactly once; columns added to the catalog
/// after the preference was stored surface at the end instead of
/// vanishing.
pub fn effective_optional_order(registry: &ColumnRegistry, order_override: &[String]) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(registry.optional_keys().len());
    for key in order_override {
        if registry.is_optional(key) && !result.contains(key) {
            result.push(key.clone());
        }
    }
    for key in registry.optional_keys() {
        if !result.contains(key) {
            result.push(key.clone());
        }
    }
    result
}

/// The order actually rendered: required keys in catalog order, then the
/// resolved optional order.
pub fn effective_full_order(registry: &ColumnRegistry, state: &PreferenceState) -> Vec<String> {
    let mut order = registry.required_keys().to_vec();
    order.extend(effective_optional_order(registry, &state.order));
    order
}

/// Required columns are always visible; optional ones unless hidden.
pub fn is_visible(column: &Column, state: &PreferenceState) -> bool {
    column.required || !state.hidden.contains(&column.key)
}

/// Sort-state decoration stripped from a header cell while its column is
/// hidden, so a hidden column cannot silently remain the active sort.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SortDecoration {
    pub aria_sort: Option<String>,
    pub sort_order: Option<String>,
}

impl SortDecoration {
    pub fn is_empty(&self) -> bool {
        self.aria_sort.is_none() && self.sort_order.is_none()
    }
}

/// Side table of stripped decorations, keyed by column key.
///
/// Decorations live here (not smuggled through attributes on the cell)
/// and are restored verbatim when the column becomes visible again.
#[derive(Debug, Default)]
pub struct SavedDecorations {
    saved: HashMap<String, SortDecoration>,
}

impl SavedDecorations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a stripped decoration for a key, unless one is already
    /// held: hiding an already-hidden column must not overwrite the
    /// original decoration with the stripped state.
    pub fn save_once(&mut self, key: &str, decoration: SortDecoration) {
        if decoration.is_empty() {
            return;
        }
        self.saved.entry(key.to_string()).or_insert(decoration);
    }

    /// Take the decoration saved for a key, if any.
    pub fn take(&mut self, key: &str) -> Option<SortDecoration> {
        self.saved.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.saved.contains_key(key)
    }
}
