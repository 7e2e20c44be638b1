use tabledom::{
    Content, Element, contains_id, find_by_attr, find_element, find_element_mut, find_with_attr,
    for_each_by_attr_mut, move_child, reorder_children_by_rank, text_content,
};

fn list() -> Element {
    Element::box_()
        .id("list")
        .child(Element::text("alpha").id("a").attr("data-key", "a"))
        .child(Element::text("beta").id("b").attr("data-key", "b"))
        .child(Element::text("gamma").id("c").attr("data-key", "c"))
        .child(Element::text("delta").id("d"))
}

fn child_ids(parent: &Element) -> Vec<&str> {
    parent
        .children_ref()
        .iter()
        .map(|el| el.id.as_str())
        .collect()
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_find_element_by_id() {
    let root = list();
    assert!(find_element(&root, "b").is_some());
    assert!(find_element(&root, "missing").is_none());
    assert!(contains_id(&root, "c"));
    assert!(!contains_id(&root, "x"));
}

#[test]
fn test_find_by_attr_value() {
    let root = list();
    let found = find_by_attr(&root, "data-key", "c").expect("c by attr");
    assert_eq!(found.id, "c");
    assert!(find_by_attr(&root, "data-key", "zz").is_none());
}

#[test]
fn test_find_with_attr_presence() {
    let root = Element::box_()
        .id("root")
        .child(Element::box_().id("plain"))
        .child(Element::box_().id("marked").attr("data-table", "true"));
    assert_eq!(
        find_with_attr(&root, "data-table").map(|el| el.id.as_str()),
        Some("marked")
    );
}

#[test]
fn test_for_each_by_attr_mut_touches_every_match() {
    let mut root = Element::box_()
        .id("table")
        .child(Element::box_().id("h").attr("data-key", "x"))
        .child(
            Element::box_()
                .id("row")
                .child(Element::box_().id("cell").attr("data-key", "x")),
        );
    let mut seen = Vec::new();
    for_each_by_attr_mut(&mut root, "data-key", "x", &mut |el| {
        seen.push(el.id.clone());
        el.set_attr("data-column-hidden", "true");
    });
    assert_eq!(seen, vec!["h".to_string(), "cell".to_string()]);
    assert!(
        find_element(&root, "cell")
            .is_some_and(|el| el.get_attr("data-column-hidden") == Some("true"))
    );
}

#[test]
fn test_text_content_concatenates_and_trims() {
    let el = Element::box_()
        .child(Element::text("  Email  "))
        .child(Element::box_().child(Element::text("address")));
    assert_eq!(text_content(&el), "Email address");
}

// ============================================================================
// Mutation
// ============================================================================

#[test]
fn test_attr_set_and_remove() {
    let mut el = Element::box_().attr("aria-sort", "ascending");
    assert_eq!(el.get_attr("aria-sort"), Some("ascending"));
    assert_eq!(el.remove_attr("aria-sort"), Some("ascending".to_string()));
    assert!(!el.has_attr("aria-sort"));
    assert_eq!(el.remove_attr("aria-sort"), None);
}

#[test]
fn test_width_styles_set_and_clear_together() {
    let mut el = Element::box_();
    el.set_width_styles(Some(240.0));
    assert_eq!(el.width, Some(240.0));
    assert_eq!(el.min_width, Some(240.0));
    assert_eq!(el.max_width, Some(240.0));
    el.set_width_styles(None);
    assert_eq!(el.width, None);
    assert_eq!(el.min_width, None);
    assert_eq!(el.max_width, None);
}

#[test]
fn test_checkbox_state() {
    let mut el = Element::checkbox(true);
    assert!(el.is_checked());
    el.set_checked(false);
    assert!(!el.is_checked());
    // set_checked on a non-checkbox is a no-op
    let mut text = Element::text("x");
    text.set_checked(true);
    assert!(!text.is_checked());
}

#[test]
fn test_insert_child_before() {
    let mut root = list();
    root.insert_child_before(Element::box_().id("new"), "c");
    assert_eq!(child_ids(&root), vec!["a", "b", "new", "c", "d"]);
    // Unknown anchor appends
    root.insert_child_before(Element::box_().id("tail"), "missing");
    assert_eq!(child_ids(&root).last(), Some(&"tail"));
}

// ============================================================================
// Reordering
// ============================================================================

#[test]
fn test_reorder_ranked_to_back_in_rank_order() {
    let mut root = list();
    // c -> 0, a -> 1; b and d carry no rank
    reorder_children_by_rank(&mut root, |el| match el.get_attr("data-key") {
        Some("c") => Some(0),
        Some("a") => Some(1),
        _ => None,
    });
    assert_eq!(child_ids(&root), vec!["b", "d", "c", "a"]);
}

#[test]
fn test_reorder_preserves_identity() {
    let mut root = list();
    if let Some(a) = find_element_mut(&mut root, "a") {
        a.set_attr("marker", "kept");
    }
    reorder_children_by_rank(&mut root, |el| match el.get_attr("data-key") {
        Some("a") => Some(1),
        Some("b") => Some(0),
        _ => None,
    });
    let a = find_element(&root, "a").expect("a survives");
    assert_eq!(a.get_attr("marker"), Some("kept"));
    assert!(matches!(a.content, Content::Text(_)));
}

#[test]
fn test_reorder_on_childless_element_is_noop() {
    let mut el = Element::text("leaf");
    reorder_children_by_rank(&mut el, |_| Some(0));
    assert!(matches!(el.content, Content::Text(_)));
}

#[test]
fn test_move_child_before_and_after() {
    let mut root = list();
    assert!(move_child(&mut root, "d", "a", false));
    assert_eq!(child_ids(&root), vec!["d", "a", "b", "c"]);
    assert!(move_child(&mut root, "d", "b", true));
    assert_eq!(child_ids(&root), vec!["a", "b", "d", "c"]);
}

#[test]
fn test_move_child_rejects_self_and_missing() {
    let mut root = list();
    assert!(!move_child(&mut root, "a", "a", true));
    assert!(!move_child(&mut root, "missing", "a", true));
    assert!(!move_child(&mut root, "a", "missing", true));
    assert_eq!(child_ids(&root), vec!["a", "b", "c", "d"]);
}
