mod node;

pub use node::Element;

/// Element content. The engine only distinguishes text, checkbox state,
/// and child lists; anything richer belongs to the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    None,
    Text(String),
    Checkbox {
        checked: bool,
    },
    Children(Vec<Element>),
}

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_element_mut(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Whether the subtree rooted at `root` contains an element with `id`.
pub fn contains_id(root: &Element, id: &str) -> bool {
    find_element(root, id).is_some()
}

/// Find the first element (tree order) whose attribute `key` equals `value`.
pub fn find_by_attr<'a>(root: &'a Element, key: &str, value: &str) -> Option<&'a Element> {
    if root.get_attr(key) == Some(value) {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_by_attr(child, key, value) {
                return Some(found);
            }
        }
    }

    None
}

/// Find the first element (tree order) carrying attribute `key` at all.
pub fn find_with_attr<'a>(root: &'a Element, key: &str) -> Option<&'a Element> {
    if root.has_attr(key) {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_with_attr(child, key) {
                return Some(found);
            }
        }
    }

    None
}

/// Find the first element (tree order) carrying attribute `key`, mutably.
pub fn find_with_attr_mut<'a>(root: &'a mut Element, key: &str) -> Option<&'a mut Element> {
    if root.has_attr(key) {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_with_attr_mut(child, key) {
                return Some(found);
            }
        }
    }

    None
}

/// Run `f` on every element in the subtree carrying attribute `key`.
pub fn for_each_with_attr_mut<F>(root: &mut Element, key: &str, f: &mut F)
where
    F: FnMut(&mut Element),
{
    if root.has_attr(key) {
        f(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            for_each_with_attr_mut(child, key, f);
        }
    }
}

/// Run `f` on every element in the subtree whose attribute `key` equals `value`.
pub fn for_each_by_attr_mut<F>(root: &mut Element, key: &str, value: &str, f: &mut F)
where
    F: FnMut(&mut Element),
{
    if root.get_attr(key) == Some(value) {
        f(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            for_each_by_attr_mut(child, key, value, f);
        }
    }
}

/// Collect the IDs of every element in the subtree carrying attribute `key`.
pub fn collect_ids_with_attr(root: &Element, key: &str) -> Vec<String> {
    let mut result = Vec::new();
    collect_ids_with_attr_recursive(root, key, &mut result);
    result
}

fn collect_ids_with_attr_recursive(element: &Element, key: &str, result: &mut Vec<String>) {
    if element.has_attr(key) {
        result.push(element.id.clone());
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            collect_ids_with_attr_recursive(child, key, result);
        }
    }
}

/// Concatenated, whitespace-trimmed text content of the subtree.
pub fn text_content(element: &Element) -> String {
    let mut parts = Vec::new();
    collect_text(element, &mut parts);
    parts.join(" ").trim().to_string()
}

fn collect_text(element: &Element, parts: &mut Vec<String>) {
    match &element.content {
        Content::Text(text) => {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        }
        Content::Children(children) => {
            for child in children {
                collect_text(child, parts);
            }
        }
        _ => {}
    }
}

/// Reorder `parent`'s children in place: children for which `rank_of`
/// yields a rank move to the back in rank order; the rest keep their
/// relative order at the front. Nodes are moved, never rebuilt, so
/// identity (and everything hanging off it) survives the reorder.
pub fn reorder_children_by_rank<F>(parent: &mut Element, rank_of: F)
where
    F: Fn(&Element) -> Option<usize>,
{
    let Content::Children(children) = &mut parent.content else {
        return;
    };

    let mut unranked = Vec::new();
    let mut ranked: Vec<(usize, Element)> = Vec::new();
    for element in children.drain(..) {
        match rank_of(&element) {
            Some(rank) => ranked.push((rank, element)),
            None => unranked.push(element),
        }
    }
    ranked.sort_by_key(|(rank, _)| *rank);

    children.extend(unranked);
    children.extend(ranked.into_iter().map(|(_, element)| element));
}

/// Move the direct child `child_id` immediately before or after the direct
/// child `target_id`. Returns false (and leaves the list untouched) when
/// either child is missing or they are the same node.
pub fn move_child(parent: &mut Element, child_id: &str, target_id: &str, after: bool) -> bool {
    if child_id == target_id {
        return false;
    }
    let Content::Children(children) = &mut parent.content else {
        return false;
    };

    let Some(from) = children.iter().position(|el| el.id == child_id) else {
        return false;
    };

    let moved = children.remove(from);
    // Target index is looked up after the removal shifted the list.
    let Some(target) = children.iter().position(|el| el.id == target_id) else {
        children.insert(from, moved);
        return false;
    };
    let insert_at = if after { target + 1 } else { target };
    children.insert(insert_at, moved);
    true
}
