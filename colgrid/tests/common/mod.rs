#![allow(dead_code)]

//! Shared fixture: a clients table with one required column (name) and
//! three optional ones (email, phone, status), one sparse body row, and
//! an unkeyed actions cell.

use colgrid::{ColumnEngine, MemoryBackend, StoreHandle, markup};
use tabledom::{
    Element, Event, FocusState, Geometry, Key, Modifiers, PointerButton, Rect, find_element,
    find_with_attr,
};

pub const PREFS_KEY: &str = "clients:columns";
pub const WIDTHS_KEY: &str = "clients:widths";

pub fn header_cell(key: &str, label: &str) -> Element {
    Element::text(label)
        .id(format!("th-{key}"))
        .attr(markup::COLUMN_KEY, key)
}

pub fn body_cell(row: usize, key: &str) -> Element {
    Element::text(format!("{key}-{row}"))
        .id(format!("td-{row}-{key}"))
        .attr(markup::COLUMN_KEY, key)
}

/// Columns: name (required), email, phone (min width 100), status.
/// Row 0 is complete; row 1 is missing the status cell and carries an
/// unkeyed actions cell at the end.
pub fn sample_document() -> Element {
    let header = Element::box_()
        .id("head-row")
        .attr(markup::HEADER_ROW, "true")
        .child(header_cell("name", "Name").attr(markup::COLUMN_REQUIRED, "true"))
        .child(header_cell("email", "Email"))
        .child(header_cell("phone", "Phone").attr(markup::COLUMN_MIN_WIDTH, "100"))
        .child(header_cell("status", "Status"));

    let row0 = Element::box_()
        .id("row-0")
        .attr(markup::BODY_ROW, "true")
        .child(body_cell(0, "name"))
        .child(body_cell(0, "email"))
        .child(body_cell(0, "phone"))
        .child(body_cell(0, "status"));

    let row1 = Element::box_()
        .id("row-1")
        .attr(markup::BODY_ROW, "true")
        .child(body_cell(1, "name"))
        .child(body_cell(1, "email"))
        .child(body_cell(1, "phone"))
        .child(Element::text("edit | delete").id("td-1-actions"));

    let table = Element::box_()
        .id("clients-table")
        .attr(markup::TABLE, "true")
        .child(header)
        .child(row0)
        .child(row1);

    let container = Element::box_()
        .id("clients")
        .attr(markup::CONTAINER, "true")
        .attr(markup::CHOOSER_LABEL, "Client columns")
        .attr(markup::STORAGE_KEY, PREFS_KEY)
        .attr(markup::WIDTHS_STORAGE_KEY, WIDTHS_KEY)
        .child(
            Element::box_()
                .id("toolbar")
                .attr(markup::TOOLBAR, "true")
                .child(
                    Element::button("Columns")
                        .id("clients-toggle")
                        .attr(markup::TOGGLE, "true"),
                ),
        )
        .child(
            Element::box_()
                .id("wrapper")
                .attr(markup::WRAPPER, "true")
                .child(table),
        );

    Element::box_().id("page").child(container)
}

pub fn header_geometry() -> Geometry {
    let mut geometry = Geometry::new();
    geometry.insert("th-name", Rect::new(0.0, 0.0, 120.0, 24.0));
    geometry.insert("th-email", Rect::new(120.0, 0.0, 220.0, 24.0));
    geometry.insert("th-phone", Rect::new(340.0, 0.0, 140.0, 24.0));
    geometry.insert("th-status", Rect::new(480.0, 0.0, 120.0, 24.0));
    geometry
}

pub fn memory_store() -> StoreHandle {
    StoreHandle::new(MemoryBackend::new())
}

pub fn attach(document: &mut Element, store: &StoreHandle) -> ColumnEngine {
    ColumnEngine::attach(document, "clients", store).expect("engine attaches to fixture")
}

pub fn click(id: &str) -> Event {
    Event::Click {
        target: Some(id.to_string()),
        x: 0.0,
        y: 0.0,
        button: PointerButton::Left,
    }
}

pub fn escape() -> Event {
    Event::Key {
        target: None,
        key: Key::Escape,
        modifiers: Modifiers::default(),
    }
}

pub fn pointer_down(id: &str, x: f64) -> Event {
    Event::PointerDown {
        target: Some(id.to_string()),
        x,
        y: 12.0,
        button: PointerButton::Left,
    }
}

pub fn pointer_move(x: f64) -> Event {
    Event::PointerMove { x, y: 12.0 }
}

pub fn pointer_up(x: f64) -> Event {
    Event::PointerUp {
        target: None,
        x,
        y: 12.0,
        button: PointerButton::Left,
    }
}

/// Header cell keys in current tree order, hidden or not.
pub fn header_order(document: &Element) -> Vec<String> {
    keyed_children(document, "head-row")
}

/// Header cell keys in current tree order, hidden cells excluded.
pub fn visible_header_order(document: &Element) -> Vec<String> {
    let row = find_element(document, "head-row").expect("header row");
    row.children_ref()
        .iter()
        .filter(|cell| !cell.has_attr(markup::COLUMN_HIDDEN))
        .filter_map(|cell| cell.get_attr(markup::COLUMN_KEY))
        .map(str::to_string)
        .collect()
}

/// Keyed cell order of one row.
pub fn keyed_children(document: &Element, row_id: &str) -> Vec<String> {
    let row = find_element(document, row_id).expect("row exists");
    row.children_ref()
        .iter()
        .filter_map(|cell| cell.get_attr(markup::COLUMN_KEY))
        .map(str::to_string)
        .collect()
}

/// Raw child IDs of one element.
pub fn child_ids(document: &Element, id: &str) -> Vec<String> {
    let el = find_element(document, id).expect("element exists");
    el.children_ref()
        .iter()
        .map(|child| child.id.clone())
        .collect()
}

/// The panel list's column keys in current order.
pub fn panel_list_order(engine: &ColumnEngine, document: &Element) -> Vec<String> {
    keyed_children(document, engine.panel().list_id())
}

pub fn panel_item_id(engine: &ColumnEngine, key: &str) -> String {
    engine
        .panel()
        .controls_for(key)
        .expect("column controls")
        .item_id
        .clone()
}

pub fn checkbox_id(engine: &ColumnEngine, key: &str) -> String {
    engine
        .panel()
        .controls_for(key)
        .expect("column controls")
        .checkbox_id
        .clone()
}

pub fn open_panel(
    engine: &mut ColumnEngine,
    document: &mut Element,
    geometry: &Geometry,
    focus: &mut FocusState,
) {
    engine.handle_event(document, geometry, focus, &click("clients-toggle"));
    assert!(engine.panel().is_open());
}

/// The panel element, wherever it was mounted.
pub fn panel_element<'a>(engine: &ColumnEngine, document: &'a Element) -> &'a Element {
    find_element(document, engine.panel().panel_id()).expect("panel mounted")
}

/// The table element.
pub fn table_element<'a>(document: &'a Element) -> &'a Element {
    find_with_attr(
        find_element(document, "clients").expect("container"),
        markup::TABLE,
    )
    .expect("table")
}
