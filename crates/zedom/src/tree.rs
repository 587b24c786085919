//! Tree mutators: `append`, `prepend`, `add_before`, `add_after`,
//! `remove_children`
//!
//! Node arguments are flattened first; `None` entries are skipped and a
//! DocumentFragment contributes its children.

use zedom_dom::{Document, NodeId};

use crate::internal::{flatten, NodeArg};
use crate::Result;

/// Append `nodes` to `parent` in argument order. Returns `parent`.
pub fn append(doc: &mut Document, parent: NodeId, nodes: impl Into<NodeArg>) -> Result<NodeId> {
    for node in flatten(&nodes.into()) {
        doc.append_child(parent, node)?;
    }
    Ok(parent)
}

/// Insert each node before `parent`'s current first child, one at a time,
/// so the last node ends up first. Returns `parent`.
pub fn prepend(doc: &mut Document, parent: NodeId, nodes: impl Into<NodeArg>) -> Result<NodeId> {
    for node in flatten(&nodes.into()) {
        match doc.tree().first_child(parent) {
            Some(first) => doc.insert_before(parent, node, Some(first))?,
            None => doc.append_child(parent, node)?,
        };
    }
    Ok(parent)
}

/// Insert `new_node` right before `el`. `None` when `el` is missing or
/// has no parent; otherwise the inserted node.
pub fn add_before(doc: &mut Document, el: impl Into<Option<NodeId>>, new_node: NodeId) -> Result<Option<NodeId>> {
    let Some(el) = el.into() else { return Ok(None) };
    let Some(parent) = doc.parent(el) else { return Ok(None) };
    Ok(Some(doc.insert_before(parent, new_node, Some(el))?))
}

/// Insert `new_node` right after `el`
pub fn add_after(doc: &mut Document, el: impl Into<Option<NodeId>>, new_node: NodeId) -> Result<Option<NodeId>> {
    let Some(el) = el.into() else { return Ok(None) };
    let Some(parent) = doc.parent(el) else { return Ok(None) };
    let next = doc.tree().next_sibling(el);
    Ok(Some(doc.insert_before(parent, new_node, next)?))
}

/// Remove every child node of `el`, last child first
pub fn remove_children(doc: &mut Document, el: impl Into<Option<NodeId>>) -> Result<()> {
    let Some(el) = el.into() else { return Ok(()) };
    while let Some(last) = doc.tree().last_child(el) {
        doc.remove_child(el, last)?;
    }
    Ok(())
}
