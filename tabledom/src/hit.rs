use crate::element::{Content, Element};
use crate::geometry::Geometry;

/// Find the deepest clickable, enabled element at the given coordinates.
/// Returns None if no such element contains the point.
pub fn hit_test(geometry: &Geometry, root: &Element, x: f64, y: f64) -> Option<String> {
    hit_test_element(geometry, root, x, y, &|el| el.clickable && !el.disabled)
}

/// Find any element at the given coordinates.
/// Returns the deepest element containing the point.
pub fn hit_test_any(geometry: &Geometry, root: &Element, x: f64, y: f64) -> Option<String> {
    hit_test_element(geometry, root, x, y, &|_| true)
}

/// Find the focusable element at the given coordinates.
pub fn hit_test_focusable(geometry: &Geometry, root: &Element, x: f64, y: f64) -> Option<String> {
    hit_test_element(geometry, root, x, y, &|el| el.focusable && !el.disabled)
}

fn hit_test_element(
    geometry: &Geometry,
    element: &Element,
    x: f64,
    y: f64,
    accept: &dyn Fn(&Element) -> bool,
) -> Option<String> {
    // Hidden subtrees are not painted and cannot be hit.
    if element.hidden {
        return None;
    }

    let rect = geometry.get(&element.id)?;
    if !rect.contains(x, y) {
        return None;
    }

    // Check children in reverse order (last rendered = on top)
    if let Content::Children(children) = &element.content {
        for child in children.iter().rev() {
            if let Some(id) = hit_test_element(geometry, child, x, y, accept) {
                return Some(id);
            }
        }
    }

    if accept(element) {
        Some(element.id.clone())
    } else {
        None
    }
}

/// Find the nearest draggable ancestor-or-self of `id`, by ID.
pub fn find_draggable_ancestor(root: &Element, id: &str) -> Option<String> {
    let mut path = Vec::new();
    if !build_path(root, id, &mut path) {
        return None;
    }
    path.iter()
        .rev()
        .find(|el| el.draggable)
        .map(|el| el.id.clone())
}

fn build_path<'a>(element: &'a Element, id: &str, path: &mut Vec<&'a Element>) -> bool {
    path.push(element);
    if element.id == id {
        return true;
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            if build_path(child, id, path) {
                return true;
            }
        }
    }
    path.pop();
    false
}
