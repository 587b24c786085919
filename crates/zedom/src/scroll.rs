//! Scroll-parent lookup

use zedom_dom::{NodeId, NodeType};

use crate::Window;

const SCROLLABLE: [&str; 3] = ["auto", "scroll", "overlay"];

/// Nearest ancestor whose computed overflow is `auto`, `scroll` or
/// `overlay`, or the document node when none is.
///
/// `None` for a missing start node, and for a start node that is the
/// document itself or sits in a detached subtree.
pub fn get_scroll_parent(window: &Window, node: impl Into<Option<NodeId>>) -> Option<NodeId> {
    let doc = window.document();
    let mut node = node.into()?;
    loop {
        if doc.node_type(node)? == NodeType::Document {
            return None;
        }
        let parent = doc.parent(node)?;
        match doc.node_type(parent)? {
            NodeType::Document => return Some(parent),
            NodeType::Element => {
                // overflow is not inherited
                let style = window.styles().cascaded_style(doc.tree(), parent);
                let overflow = format!("{}{}{}", style.overflow(), style.get("overflow-x"), style.get("overflow-y"));
                tracing::trace!(?parent, %overflow, "scroll parent candidate");
                if SCROLLABLE.iter().any(|keyword| overflow.contains(keyword)) {
                    return Some(parent);
                }
            }
            _ => {}
        }
        node = parent;
    }
}
