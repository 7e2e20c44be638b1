mod common;

use colgrid::{ColumnEngine, markup};
use common::{
    attach, checkbox_id, click, header_cell, header_geometry, memory_store, open_panel,
    panel_item_id, panel_list_order, pointer_down, pointer_move, pointer_up, sample_document,
};
use tabledom::{Element, Event, FocusState, find_element, find_element_mut};

// ============================================================================
// Attach prerequisites
// ============================================================================

#[test]
fn test_attach_declines_without_a_table() {
    let store = memory_store();
    let mut document = Element::box_().id("page").child(
        Element::box_()
            .id("bare")
            .attr(markup::CONTAINER, "true")
            .child(Element::button("Columns").id("t").attr(markup::TOGGLE, "true")),
    );
    assert!(ColumnEngine::attach(&mut document, "bare", &store).is_none());
    // No partial panel was built.
    let container = find_element(&document, "bare").expect("container");
    assert_eq!(container.children_ref().len(), 1);
    assert!(!container.has_attr(markup::CONTAINER_INITIALIZED));
}

#[test]
fn test_attach_declines_without_a_toggle() {
    let store = memory_store();
    let mut document = sample_document();
    if let Some(toggle) = find_element_mut(&mut document, "clients-toggle") {
        toggle.remove_attr(markup::TOGGLE);
    }
    assert!(ColumnEngine::attach(&mut document, "clients", &store).is_none());
}

#[test]
fn test_attach_declines_without_keyed_header_cells() {
    let store = memory_store();
    let mut document = sample_document();
    if let Some(row) = find_element_mut(&mut document, "head-row") {
        if let Some(cells) = row.children_mut() {
            for cell in cells {
                cell.remove_attr(markup::COLUMN_KEY);
            }
        }
    }
    assert!(ColumnEngine::attach(&mut document, "clients", &store).is_none());
    let container = find_element(&document, "clients").expect("container");
    assert!(!container.has_attr(markup::CONTAINER_INITIALIZED));
}

#[test]
fn test_attach_all_attaches_once_per_container() {
    let store = memory_store();
    let mut document = sample_document();
    let engines = ColumnEngine::attach_all(&mut document, &store);
    assert_eq!(engines.len(), 1);
    let container = find_element(&document, "clients").expect("container");
    assert_eq!(container.get_attr(markup::CONTAINER_INITIALIZED), Some("true"));

    // A second scan skips the initialized container.
    let engines = ColumnEngine::attach_all(&mut document, &store);
    assert!(engines.is_empty());
}

#[test]
fn test_attach_derives_catalog_from_header_markup() {
    let store = memory_store();
    let mut document = sample_document();
    let engine = attach(&mut document, &store);

    let registry = engine.registry();
    assert_eq!(registry.required_keys(), ["name".to_string()]);
    assert_eq!(
        registry.optional_keys(),
        ["email".to_string(), "phone".to_string(), "status".to_string()]
    );
    let email = registry.get("email").expect("email column");
    assert_eq!(email.label, "Email");

    // Resize handles were injected into every keyed header cell.
    for key in ["name", "email", "phone", "status"] {
        let handle_id = format!("clients-resize-{key}");
        let handle = find_element(&document, &handle_id).expect("handle injected");
        assert_eq!(handle.get_attr(markup::RESIZE_HANDLE), Some(key));
    }
}

#[test]
fn test_default_hidden_column_starts_hidden() {
    let store = memory_store();
    let mut document = sample_document();
    // Mark status as default-hidden before attaching.
    if let Some(cell) = find_element_mut(&mut document, "th-status") {
        cell.set_attr(markup::COLUMN_DEFAULT_HIDDEN, "true");
    }
    let engine = attach(&mut document, &store);

    assert!(engine.state().hidden.contains("status"));
    assert_eq!(
        common::visible_header_order(&document),
        vec!["name", "email", "phone"]
    );
    let check = find_element(&document, &checkbox_id(&engine, "status")).expect("checkbox");
    assert!(!check.is_checked());
}

#[test]
fn test_attach_applies_persisted_widths() {
    let store = memory_store();
    store
        .set(common::WIDTHS_KEY, br#"{"email": 300.0}"#.to_vec())
        .expect("seed widths");
    let mut document = sample_document();
    let engine = attach(&mut document, &store);

    assert_eq!(engine.widths().get("email"), Some(&300.0));
    for id in ["th-email", "td-0-email", "td-1-email"] {
        let cell = find_element(&document, id).expect("cell");
        assert_eq!(cell.width, Some(300.0));
    }
}

// ============================================================================
// Sort decoration through hide/show
// ============================================================================

#[test]
fn test_hiding_the_sorted_column_strips_and_restores_decoration() {
    let store = memory_store();
    let geometry = header_geometry();
    let mut focus = FocusState::new();
    let mut document = sample_document();
    {
        let cell = find_element_mut(&mut document, "th-email").expect("header cell");
        cell.set_attr(markup::ARIA_SORT, "ascending");
        cell.set_attr(markup::SORT_ORDER, "1");
    }
    let mut engine = attach(&mut document, &store);
    open_panel(&mut engine, &mut document, &geometry, &mut focus);

    let email_check = checkbox_id(&engine, "email");
    engine.handle_event(&mut document, &geometry, &mut focus, &click(&email_check));
    let cell = find_element(&document, "th-email").expect("header cell");
    assert!(!cell.has_attr(markup::ARIA_SORT));
    assert!(!cell.has_attr(markup::SORT_ORDER));

    engine.handle_event(&mut document, &geometry, &mut focus, &click(&email_check));
    let cell = find_element(&document, "th-email").expect("header cell");
    assert_eq!(cell.get_attr(markup::ARIA_SORT), Some("ascending"));
    assert_eq!(cell.get_attr(markup::SORT_ORDER), Some("1"));
}

// ============================================================================
// Reset: hide a column, reorder another, resize a third, then reset
// ============================================================================

#[test]
fn test_reset_restores_defaults_everywhere() {
    let store = memory_store();
    let geometry = header_geometry();
    let mut focus = FocusState::new();
    let mut document = sample_document();
    let mut engine = attach(&mut document, &store);
    open_panel(&mut engine, &mut document, &geometry, &mut focus);

    // Hide phone.
    let phone_check = checkbox_id(&engine, "phone");
    engine.handle_event(&mut document, &geometry, &mut focus, &click(&phone_check));
    // Drag status before email.
    let status_item = panel_item_id(&engine, "status");
    let email_item = panel_item_id(&engine, "email");
    engine.handle_event(
        &mut document,
        &geometry,
        &mut focus,
        &Event::DragStart {
            target: status_item,
        },
    );
    engine.handle_event(
        &mut document,
        &geometry,
        &mut focus,
        &Event::Drop {
            target: Some(email_item),
        },
    );
    engine.handle_event(&mut document, &geometry, &mut focus, &Event::DragEnd);
    // Resize email to 250.
    engine.handle_event(
        &mut document,
        &geometry,
        &mut focus,
        &pointer_down("clients-resize-email", 340.0),
    );
    engine.handle_event(&mut document, &geometry, &mut focus, &pointer_move(370.0));
    engine.handle_event(&mut document, &geometry, &mut focus, &pointer_up(370.0));

    assert_eq!(
        engine.effective_order(),
        vec!["name", "status", "email", "phone"]
    );
    assert_eq!(engine.widths().get("email"), Some(&250.0));

    // Reset from the panel.
    let reset_id = engine.panel().reset_id().to_string();
    engine.handle_event(&mut document, &geometry, &mut focus, &click(&reset_id));

    assert_eq!(
        engine.effective_order(),
        vec!["name", "email", "phone", "status"]
    );
    assert_eq!(
        common::visible_header_order(&document),
        vec!["name", "email", "phone", "status"]
    );
    assert_eq!(
        panel_list_order(&engine, &document),
        vec!["name", "email", "phone", "status"]
    );
    assert!(engine.state().hidden.is_empty());
    assert!(engine.state().order.is_empty());
    assert!(engine.widths().is_empty());
    let cell = find_element(&document, "th-email").expect("header cell");
    assert_eq!(cell.width, None);
    // The panel stays open after a reset.
    assert!(engine.panel().is_open());
}

#[test]
fn test_reset_force_ends_a_live_resize() {
    let store = memory_store();
    let geometry = header_geometry();
    let mut focus = FocusState::new();
    let mut document = sample_document();
    let mut engine = attach(&mut document, &store);

    engine.handle_event(
        &mut document,
        &geometry,
        &mut focus,
        &pointer_down("clients-resize-email", 340.0),
    );
    engine.handle_event(&mut document, &geometry, &mut focus, &pointer_move(400.0));
    assert!(engine.session_active());

    engine.reset(&mut document);
    assert!(!engine.session_active());
    let container = find_element(&document, "clients").expect("container");
    assert!(!container.has_attr(markup::RESIZING));
    assert!(engine.widths().is_empty());
}

// ============================================================================
// Required-column invariant across mixed operations
// ============================================================================

#[test]
fn test_required_prefix_survives_arbitrary_operations() {
    let store = memory_store();
    let geometry = header_geometry();
    let mut focus = FocusState::new();

    // Two required columns to check their mutual order too.
    let mut document = sample_document();
    if let Some(row) = find_element_mut(&mut document, "head-row")
        && let Some(cells) = row.children_mut()
    {
        cells.insert(
            1,
            header_cell("badge", "Badge").attr(markup::COLUMN_REQUIRED, "true"),
        );
    }

    let mut engine = attach(&mut document, &store);
    open_panel(&mut engine, &mut document, &geometry, &mut focus);

    let phone_check = checkbox_id(&engine, "phone");
    let status_item = panel_item_id(&engine, "status");
    let email_item = panel_item_id(&engine, "email");

    engine.handle_event(&mut document, &geometry, &mut focus, &click(&phone_check));
    engine.handle_event(
        &mut document,
        &geometry,
        &mut focus,
        &Event::DragStart {
            target: status_item,
        },
    );
    engine.handle_event(
        &mut document,
        &geometry,
        &mut focus,
        &Event::Drop {
            target: Some(email_item),
        },
    );
    engine.handle_event(&mut document, &geometry, &mut focus, &Event::DragEnd);
    engine.handle_event(&mut document, &geometry, &mut focus, &click(&phone_check));

    let order = engine.effective_order();
    assert_eq!(&order[..2], &["name".to_string(), "badge".to_string()]);
    assert_eq!(common::header_order(&document)[..2], order[..2]);
    for key in ["name", "badge"] {
        let cell = find_element(&document, &format!("th-{key}")).expect("header cell");
        assert!(!cell.has_attr(markup::COLUMN_HIDDEN));
    }
}
