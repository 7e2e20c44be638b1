//! Headless demo: attaches the engine to a participants table and replays
//! a scripted customization session, printing the resolved column order
//! after each step. Run with `cargo run --example demo -p colgrid`.

use std::fs::File;

use colgrid::{ColumnEngine, MemoryBackend, StoreHandle, markup};
use simplelog::{Config, LevelFilter, WriteLogger};
use tabledom::{Element, Event, FocusState, Geometry, PointerButton, Rect};

fn header_cell(key: &str, label: &str, required: bool) -> Element {
    let mut cell = Element::text(label)
        .id(format!("th-{key}"))
        .attr(markup::COLUMN_KEY, key);
    if required {
        cell.set_attr(markup::COLUMN_REQUIRED, "true");
    }
    cell
}

fn body_cell(row: usize, key: &str, value: &str) -> Element {
    Element::text(value)
        .id(format!("td-{row}-{key}"))
        .attr(markup::COLUMN_KEY, key)
}

fn participants_document() -> Element {
    let header = Element::box_()
        .id("header-row")
        .attr(markup::HEADER_ROW, "true")
        .child(header_cell("name", "Name", true))
        .child(header_cell("email", "Email", false))
        .child(header_cell("phone", "Phone", false))
        .child(header_cell("status", "Status", false));

    let row = Element::box_()
        .id("row-0")
        .attr(markup::BODY_ROW, "true")
        .child(body_cell(0, "name", "Avery Quinn"))
        .child(body_cell(0, "email", "avery@example.org"))
        .child(body_cell(0, "phone", "555-0117"))
        .child(body_cell(0, "status", "Active"));

    let table = Element::box_()
        .id("participants-table")
        .attr(markup::TABLE, "true")
        .child(header)
        .child(row);

    let container = Element::box_()
        .id("participants")
        .attr(markup::CONTAINER, "true")
        .attr(markup::CHOOSER_LABEL, "Participant columns")
        .attr(markup::STORAGE_KEY, "participants:columns")
        .attr(markup::WIDTHS_STORAGE_KEY, "participants:widths")
        .child(
            Element::box_()
                .id("toolbar")
                .attr(markup::TOOLBAR, "true")
                .child(Element::button("Columns").id("columns-toggle").attr(markup::TOGGLE, "true")),
        )
        .child(
            Element::box_()
                .id("wrapper")
                .attr(markup::WRAPPER, "true")
                .child(table),
        );

    Element::box_().id("page").child(container)
}

fn click(id: &str) -> Event {
    Event::Click {
        target: Some(id.to_string()),
        x: 0.0,
        y: 0.0,
        button: PointerButton::Left,
    }
}

fn main() {
    let log_file = File::create("colgrid-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut document = participants_document();
    let mut geometry = Geometry::new();
    geometry.insert("th-email", Rect::new(120.0, 0.0, 220.0, 24.0));
    geometry.insert(
        "participants-resize-email",
        Rect::new(336.0, 0.0, 4.0, 24.0),
    );
    let mut focus = FocusState::new();

    let store = StoreHandle::new(MemoryBackend::new());
    let mut engines = ColumnEngine::attach_all(&mut document, &store);
    let Some(engine) = engines.first_mut() else {
        eprintln!("no chooser container found");
        return;
    };
    println!("attached: {:?}", engine.effective_order());

    // Open the panel and hide the phone column.
    engine.handle_event(&mut document, &geometry, &mut focus, &click("columns-toggle"));
    let phone_check = engine
        .panel()
        .controls_for("phone")
        .expect("phone controls")
        .checkbox_id
        .clone();
    engine.handle_event(&mut document, &geometry, &mut focus, &click(&phone_check));
    println!(
        "phone hidden: visible order now {:?}",
        visible_order(engine, &document)
    );

    // Move status left of email.
    let status_left = engine
        .panel()
        .controls_for("status")
        .and_then(|control| control.move_left_id.clone())
        .expect("status move button");
    engine.handle_event(&mut document, &geometry, &mut focus, &click(&status_left));
    println!("status moved: {:?}", engine.effective_order());

    // Resize the email column by dragging its header handle 60px right.
    engine.handle_event(
        &mut document,
        &geometry,
        &mut focus,
        &Event::PointerDown {
            target: Some("participants-resize-email".to_string()),
            x: 338.0,
            y: 12.0,
            button: PointerButton::Left,
        },
    );
    engine.handle_event(
        &mut document,
        &geometry,
        &mut focus,
        &Event::PointerMove { x: 398.0, y: 12.0 },
    );
    engine.handle_event(
        &mut document,
        &geometry,
        &mut focus,
        &Event::PointerUp {
            target: None,
            x: 398.0,
            y: 12.0,
            button: PointerButton::Left,
        },
    );
    println!("email width: {:?}", engine.widths().get("email"));

    // Everything persisted: a fresh engine on the same store sees it all.
    let mut fresh_document = participants_document();
    let fresh = ColumnEngine::attach(&mut fresh_document, "participants", &store)
        .expect("fresh attach");
    println!("reloaded: {:?}", fresh.effective_order());
    println!("reloaded widths: {:?}", fresh.widths().get("email"));
}

fn visible_order(engine: &ColumnEngine, document: &Element) -> Vec<String> {
    let table = tabledom::find_element(document, engine.table_id()).expect("table");
    let header = tabledom::find_with_attr(table, markup::HEADER_ROW).expect("header row");
    header
        .children_ref()
        .iter()
        .filter(|cell| !cell.has_attr(markup::COLUMN_HIDDEN))
        .filter_map(|cell| cell.get_attr(markup::COLUMN_KEY))
        .map(str::to_string)
        .collect()
}
