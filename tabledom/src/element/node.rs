use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// A retained node in the host document.
///
/// The engine never paints these; it only reads attributes and mutates
/// attributes, inline widths, the hidden flag, and child order. Whatever
/// renders the tree decides what the rest means.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,

    // Content
    pub content: Content,

    // String attributes (the `data-*`/`aria-*` surface of the markup contract)
    pub attrs: HashMap<String, String>,

    // Inline width styles, in pixels. None means intrinsic sizing.
    pub width: Option<f64>,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,

    // Presentation
    pub hidden: bool,

    // Interaction
    pub focusable: bool,
    pub clickable: bool,
    pub draggable: bool,
    pub disabled: bool,
}

impl Element {
    pub fn box_() -> Self {
        Self {
            id: generate_id("box"),
            ..Default::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    /// Create a checkbox element. Checked by default state is up to the caller.
    pub fn checkbox(checked: bool) -> Self {
        Self {
            id: generate_id("check"),
            content: Content::Checkbox { checked },
            focusable: true,
            clickable: true,
            ..Default::default()
        }
    }

    /// Create a clickable, focusable button-like element with a text label.
    pub fn button(label: impl Into<String>) -> Self {
        Self {
            id: generate_id("btn"),
            content: Content::Text(label.into()),
            focusable: true,
            clickable: true,
            ..Default::default()
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Attributes
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        self.attrs.remove(key)
    }

    // Inline widths
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn min_width(mut self, min_width: f64) -> Self {
        self.min_width = Some(min_width);
        self
    }

    pub fn max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Set width, min-width and max-width together, or clear all three.
    pub fn set_width_styles(&mut self, width: Option<f64>) {
        self.width = width;
        self.min_width = width;
        self.max_width = width;
    }

    // Presentation
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    // Interaction
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    // Checkbox state
    pub fn is_checked(&self) -> bool {
        matches!(self.content, Content::Checkbox { checked: true })
    }

    pub fn set_checked(&mut self, value: bool) {
        if let Content::Checkbox { checked } = &mut self.content {
            *checked = value;
        }
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::None => self.content = Content::Children(vec![child]),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            Content::None => self.content = Content::Children(new_children.into_iter().collect()),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }

    pub fn children_ref(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Element>> {
        match &mut self.content {
            Content::Children(children) => Some(children),
            _ => None,
        }
    }

    /// Append a child to an already-built element.
    pub fn push_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::None => self.content = Content::Children(vec![child]),
            _ => self.content = Content::Children(vec![child]),
        }
    }

    /// Insert a child immediately before the child with `before_id`.
    /// Appends when no such child exists.
    pub fn insert_child_before(&mut self, child: Element, before_id: &str) {
        match &mut self.content {
            Content::Children(children) => {
                let index = children
                    .iter()
                    .position(|el| el.id == before_id)
                    .unwrap_or(children.len());
                children.insert(index, child);
            }
            _ => self.push_child(child),
        }
    }
}
