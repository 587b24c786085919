//! Sibling queries: `get_siblings`, `get_index`

use zedom_dom::{Document, NodeId};

use crate::internal::find_index;

/// Element siblings of `el` in document order, `el` excluded
pub fn get_siblings(doc: &Document, el: impl Into<Option<NodeId>>) -> Vec<NodeId> {
    let Some(el) = el.into() else { return Vec::new() };
    let Some(parent) = doc.parent(el) else { return Vec::new() };
    doc.tree()
        .element_children(parent)
        .filter(|&child| child != el)
        .collect()
}

/// Zero-based position of `el` among its parent's element children, or -1
pub fn get_index(doc: &Document, el: impl Into<Option<NodeId>>) -> isize {
    let Some(el) = el.into() else { return -1 };
    let Some(parent) = doc.parent(el) else { return -1 };
    find_index(&doc.children(parent), 0, |&child, _| child == el)
}
