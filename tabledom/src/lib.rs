pub mod element;
pub mod event;
pub mod focus;
pub mod geometry;
pub mod hit;
pub mod input;

pub use element::{
    Content, Element, collect_ids_with_attr, contains_id, find_by_attr, find_element,
    find_element_mut, find_with_attr, find_with_attr_mut, for_each_by_attr_mut,
    for_each_with_attr_mut, move_child, reorder_children_by_rank, text_content,
};
pub use event::{Event, Key, Modifiers, PointerButton};
pub use focus::{FocusState, collect_focusable};
pub use geometry::{Geometry, Rect};
pub use hit::{find_draggable_ancestor, hit_test, hit_test_any, hit_test_focusable};
pub use input::InputState;
