//! Applies resolved order, visibility, and widths to the live table.
//!
//! All three operations mutate cells in place: reordering moves the same
//! nodes, visibility is a presentation attribute, widths are inline
//! styles. A cell is never destroyed or recreated, so row-local identity
//! survives every customization.

use std::collections::HashMap;

use tabledom::{
    Element, find_with_attr_mut, for_each_by_attr_mut, for_each_with_attr_mut,
    reorder_children_by_rank,
};

use crate::markup;
use crate::resolve::{SavedDecorations, SortDecoration};

/// Move header and body cells into rank position for the given key order.
/// Each row is handled independently; rows missing a key are skipped
/// silently, and cells without a ranked key keep their relative order
/// ahead of the ranked block.
pub fn apply_order(table: &mut Element, order: &[String]) {
    let rank: HashMap<&str, usize> = order
        .iter()
        .enumerate()
        .map(|(index, key)| (key.as_str(), index))
        .collect();
    let rank_of = |cell: &Element| {
        cell.get_attr(markup::COLUMN_KEY)
            .and_then(|key| rank.get(key))
            .copied()
    };

    if let Some(header_row) = find_with_attr_mut(table, markup::HEADER_ROW) {
        reorder_children_by_rank(header_row, &rank_of);
    }
    for_each_with_attr_mut(table, markup::BODY_ROW, &mut |row| {
        reorder_children_by_rank(row, &rank_of);
    });
}

/// Mark or unmark every cell of a column as hidden. Hidden cells stay in
/// the tree so order and width bookkeeping remain consistent.
///
/// Hiding also strips the header cell's sort decoration into the side
/// table (a hidden column must not stay the active sort); showing
/// restores exactly what was stripped, and nothing when nothing was.
pub fn apply_visibility(
    table: &mut Element,
    decorations: &mut SavedDecorations,
    key: &str,
    visible: bool,
) {
    if visible {
        if let Some(decoration) = decorations.take(key)
            && let Some(cell) = header_cell_mut(table, key)
        {
            if let Some(value) = decoration.aria_sort {
                cell.set_attr(markup::ARIA_SORT, value);
            }
            if let Some(value) = decoration.sort_order {
                cell.set_attr(markup::SORT_ORDER, value);
            }
        }
    } else if let Some(cell) = header_cell_mut(table, key) {
        let stripped = SortDecoration {
            aria_sort: cell.remove_attr(markup::ARIA_SORT),
            sort_order: cell.remove_attr(markup::SORT_ORDER),
        };
        decorations.save_once(key, stripped);
    }

    for_each_by_attr_mut(table, markup::COLUMN_KEY, key, &mut |cell| {
        if visible {
            cell.remove_attr(markup::COLUMN_HIDDEN);
        } else {
            cell.set_attr(markup::COLUMN_HIDDEN, "true");
        }
    });
}

/// Set explicit width/min-width/max-width on every cell of a column, or
/// clear all three to return the column to intrinsic sizing. Non-finite
/// or non-positive widths clear.
pub fn apply_width(table: &mut Element, key: &str, width: Option<f64>) {
    let width = width.filter(|w| w.is_finite() && *w > 0.0);
    for_each_by_attr_mut(table, markup::COLUMN_KEY, key, &mut |cell| {
        cell.set_width_styles(width);
    });
}

fn header_cell_mut<'a>(table: &'a mut Element, key: &str) -> Option<&'a mut Element> {
    let header_row = find_with_attr_mut(table, markup::HEADER_ROW)?;
    header_row
        .children_mut()?
        .iter_mut()
        .find(|cell| cell.get_attr(markup::COLUMN_KEY) == Some(key))
}
