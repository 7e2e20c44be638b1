//! Column catalog, derived once from the table's header markup.

use std::collections::HashSet;

use tabledom::{Element, find_with_attr, text_content};

use crate::markup;

/// One column of the table.
///
/// Derived from a header cell at attach time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Stable key, unique within the table.
    pub key: String,
    /// Display label (attribute override, else the cell's text content).
    pub label: String,
    /// Required columns can never be hidden or reordered.
    pub required: bool,
    /// Only meaningful for optional columns.
    pub default_hidden: bool,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            required: false,
            default_hidden: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_hidden(mut self) -> Self {
        self.default_hidden = true;
        self
    }
}

/// The immutable column catalog plus its derived views.
#[derive(Debug, Clone)]
pub struct ColumnRegistry {
    columns: Vec<Column>,
    required_keys: Vec<String>,
    optional_keys: Vec<String>,
    default_hidden: HashSet<String>,
}

impl ColumnRegistry {
    pub fn new(columns: Vec<Column>) -> Self {
        let required_keys = columns
            .iter()
            .filter(|col| col.required)
            .map(|col| col.key.clone())
            .collect();
        let optional_keys: Vec<String> = columns
            .iter()
            .filter(|col| !col.required)
            .map(|col| col.key.clone())
            .collect();
        let default_hidden = columns
            .iter()
            .filter(|col| !col.required && col.default_hidden)
            .map(|col| col.key.clone())
            .collect();
        Self {
            columns,
            required_keys,
            optional_keys,
            default_hidden,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.key == key)
    }

    /// Whether the catalog knows this key at all.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Whether this key names an optional column.
    pub fn is_optional(&self, key: &str) -> bool {
        self.get(key).is_some_and(|col| !col.required)
    }

    /// Required keys in header order.
    pub fn required_keys(&self) -> &[String] {
        &self.required_keys
    }

    /// Optional keys in header (catalog) order.
    pub fn optional_keys(&self) -> &[String] {
        &self.optional_keys
    }

    /// Optional keys hidden by default.
    pub fn default_hidden(&self) -> &HashSet<String> {
        &self.default_hidden
    }
}

/// Read the column catalog off the table's header row, in current tree
/// order. Cells without a (non-empty) column key are skipped; a missing
/// header row yields an empty catalog, which callers must treat as "do
/// not attach".
pub fn collect_columns(table: &Element) -> Vec<Column> {
    let Some(header_row) = find_with_attr(table, markup::HEADER_ROW) else {
        return Vec::new();
    };

    let mut columns = Vec::new();
    for cell in header_row.children_ref() {
        let Some(key) = cell.get_attr(markup::COLUMN_KEY) else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        let label = match cell.get_attr(markup::COLUMN_LABEL) {
            Some(label) => label.to_string(),
            None => text_content(cell),
        };
        columns.push(Column {
            key: key.to_string(),
            label,
            required: cell.get_attr(markup::COLUMN_REQUIRED) == Some("true"),
            default_hidden: cell.get_attr(markup::COLUMN_DEFAULT_HIDDEN) == Some("true"),
        });
    }
    columns
}
