//! Preference state and the store adapter that persists it.
//!
//! The persisted records are JSON and may be absent, stale, or corrupt;
//! every load degrades field-by-field to defaults, and every save
//! swallows store failures. Nothing here returns an error to the engine.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;

use crate::registry::ColumnRegistry;
use crate::store::StoreHandle;

/// Per-table customization state: what is hidden, and the explicit
/// optional-column ordering. Widths travel separately.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceState {
    /// Optional column keys currently hidden. Never contains a required key.
    pub hidden: HashSet<String>,
    /// Explicit optional-key ordering; may be a strict subset of the
    /// optional keys. No duplicates.
    pub order: Vec<String>,
}

impl PreferenceState {
    /// The state a fresh table starts from: nothing explicitly ordered,
    /// the catalog's default-hidden columns hidden.
    pub fn defaults(registry: &ColumnRegistry) -> Self {
        Self {
            hidden: registry.default_hidden().clone(),
            order: Vec::new(),
        }
    }
}

/// Serialized form of the order/visibility record.
#[derive(Debug, Serialize)]
struct PrefRecord {
    order: Vec<String>,
    hidden: Vec<String>,
}

/// Adapter between the engine and the byte store.
///
/// Holds the two storage keys from the container markup; either may be
/// absent, in which case that record is simply never persisted.
#[derive(Debug, Clone)]
pub struct PrefStore {
    handle: StoreHandle,
    prefs_key: Option<String>,
    widths_key: Option<String>,
}

impl PrefStore {
    pub fn new(handle: StoreHandle, prefs_key: Option<String>, widths_key: Option<String>) -> Self {
        Self {
            handle,
            prefs_key,
            widths_key,
        }
    }

    fn usable(&self, key: &Option<String>) -> bool {
        self.handle.available() && key.is_some()
    }

    /// Load the order/visibility record, falling back to defaults for
    /// anything absent or malformed.
    pub fn load_preferences(&self, registry: &ColumnRegistry) -> PreferenceState {
        let mut state = PreferenceState::defaults(registry);
        let Some(key) = self.prefs_key.as_deref() else {
            return state;
        };
        if !self.handle.available() {
            return state;
        }

        let raw = match self.handle.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return state,
            Err(err) => {
                log::debug!("[prefs] load failed for {key}: {err}");
                return state;
            }
        };

        let Ok(data) = serde_json::from_slice::<Value>(&raw) else {
            log::debug!("[prefs] malformed record under {key}; using defaults");
            return state;
        };

        // Field-by-field: a wrong-typed `order` must not poison `hidden`,
        // and vice versa.
        if let Some(order) = data.get("order").and_then(Value::as_array) {
            state.order = sanitize_order(registry, order);
        }
        if let Some(hidden) = data.get("hidden").and_then(Value::as_array) {
            state.hidden = hidden
                .iter()
                .filter_map(Value::as_str)
                .filter(|key| registry.is_optional(key))
                .map(str::to_string)
                .collect();
        }
        state
    }

    /// Persist the order/visibility record. Failures are swallowed.
    pub fn save_preferences(&self, registry: &ColumnRegistry, state: &PreferenceState) {
        if !self.usable(&self.prefs_key) {
            return;
        }
        let Some(key) = self.prefs_key.as_deref() else {
            return;
        };

        let mut hidden: Vec<String> = state.hidden.iter().cloned().collect();
        hidden.sort();
        let record = PrefRecord {
            order: state
                .order
                .iter()
                .filter(|key| registry.is_optional(key))
                .cloned()
                .collect(),
            hidden,
        };
        match serde_json::to_vec(&record) {
            Ok(bytes) => {
                if let Err(err) = self.handle.set(key, bytes) {
                    log::debug!("[prefs] save failed for {key}: {err}");
                }
            }
            Err(err) => log::debug!("[prefs] serialize failed: {err}"),
        }
    }

    /// Load the widths record; unknown keys and non-finite/non-positive
    /// values are dropped.
    pub fn load_widths(&self, registry: &ColumnRegistry) -> HashMap<String, f64> {
        let mut widths = HashMap::new();
        let Some(key) = self.widths_key.as_deref() else {
            return widths;
        };
        if !self.handle.available() {
            return widths;
        }

        let raw = match self.handle.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return widths,
            Err(err) => {
                log::debug!("[prefs] widths load failed for {key}: {err}");
                return widths;
            }
        };

        let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(&raw) else {
            log::debug!("[prefs] malformed widths record under {key}; ignoring");
            return widths;
        };

        for (column, value) in map {
            if !registry.contains(&column) {
                continue;
            }
            let Some(width) = value.as_f64() else {
                continue;
            };
            if width.is_finite() && width > 0.0 {
                widths.insert(column, width);
            }
        }
        widths
    }

    /// Persist the widths record. A record with no valid entry is deleted
    /// rather than written as `{}`.
    pub fn save_widths(&self, registry: &ColumnRegistry, widths: &HashMap<String, f64>) {
        if !self.usable(&self.widths_key) {
            return;
        }
        let Some(key) = self.widths_key.as_deref() else {
            return;
        };

        let valid: BTreeMap<&str, f64> = widths
            .iter()
            .filter(|(column, width)| {
                registry.contains(column) && width.is_finite() && **width > 0.0
            })
            .map(|(column, width)| (column.as_str(), *width))
            .collect();

        if valid.is_empty() {
            if let Err(err) = self.handle.delete(key) {
                log::debug!("[prefs] widths delete failed for {key}: {err}");
            }
            return;
        }

        match serde_json::to_vec(&valid) {
            Ok(bytes) => {
                if let Err(err) = self.handle.set(key, bytes) {
                    log::debug!("[prefs] widths save failed for {key}: {err}");
                }
            }
            Err(err) => log::debug!("[prefs] widths serialize failed: {err}"),
        }
    }

    /// Delete both persisted records (reset to defaults).
    pub fn clear(&self) {
        if !self.handle.available() {
            return;
        }
        for key in [self.prefs_key.as_deref(), self.widths_key.as_deref()]
            .into_iter()
            .flatten()
        {
            if let Err(err) = self.handle.delete(key) {
                log::debug!("[prefs] clear failed for {key}: {err}");
            }
        }
    }
}

/// Filter a stored order to known optional keys, dropping duplicates and
/// preserving relative order.
fn sanitize_order(registry: &ColumnRegistry, order: &[Value]) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for key in order.iter().filter_map(Value::as_str) {
        if registry.is_optional(key) && !result.iter().any(|seen| seen == key) {
            result.push(key.to_string());
        }
    }
    result
}
