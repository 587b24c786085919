//! Construction from markup: `to_element`, `create_element`

use zedom_dom::{Document, NodeId};

use crate::internal::{trim, NodeArg};
use crate::tree::append;
use crate::Result;

/// `document.createElement(tag)`
pub fn create_element(doc: &mut Document, tag: &str) -> NodeId {
    doc.create_element(tag)
}

/// Parse `html` (trimmed) in template context and return its first
/// top-level node, detached. Later top-level nodes are dropped.
///
/// Non-empty `children` are appended to the returned node in order.
/// `Ok(None)` when the markup yields no node at all.
pub fn to_element(doc: &mut Document, html: &str, children: impl Into<NodeArg>) -> Result<Option<NodeId>> {
    let fragment = zedom_html::parse_fragment(doc, trim(html))?;
    let Some(node) = doc.tree().first_child(fragment) else {
        return Ok(None);
    };
    doc.remove_child(fragment, node)?;

    let children = children.into();
    if !children.is_empty() {
        append(doc, node, children)?;
    }
    Ok(Some(node))
}
