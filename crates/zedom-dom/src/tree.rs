//! DOM Tree (arena-based allocation)

use crate::{Node, NodeData, NodeId};

/// Arena-based DOM tree
///
/// Slot 0 always holds the document node. Nodes are never freed; a node
/// removed from the tree stays addressable until the tree is dropped.
#[derive(Debug, Clone)]
pub struct DomTree {
    pub(crate) nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Move a node into the arena, returning its id
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Whether `id` addresses a node in this tree
    pub fn contains_id(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn link(&self, id: NodeId, f: impl Fn(&Node) -> NodeId) -> Option<NodeId> {
        self.get(id).map(f).filter(|n| n.is_valid())
    }

    /// `parentNode`
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |n| n.parent)
    }

    /// `firstChild`
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |n| n.first_child)
    }

    /// `lastChild`
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |n| n.last_child)
    }

    /// `nextSibling`
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |n| n.next_sibling)
    }

    /// `previousSibling`
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |n| n.prev_sibling)
    }

    /// `hasChildNodes()`
    pub fn has_child_nodes(&self, id: NodeId) -> bool {
        self.first_child(id).is_some()
    }

    /// Iterate over all child nodes (`childNodes`)
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// Element children only (`children`)
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .filter(|&(_, node)| node.is_element())
            .map(|(child, _)| child)
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&n| self.parent(n))
    }

    /// Inclusive descendants in document (pre-)order
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.contains_id(id).then_some(id),
        }
    }

    /// `a.contains(b)`: b is a or a descendant of a
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Whether the node's top-most ancestor is the document
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root(), id)
    }

    /// `textContent`: concatenated text of descendants, `None` for the
    /// document and doctype
    pub fn text_content(&self, id: NodeId) -> Option<String> {
        let node = self.get(id)?;
        match &node.data {
            NodeData::Document | NodeData::Doctype { .. } => None,
            NodeData::Text(t) => Some(t.content.clone()),
            NodeData::Comment(c) => Some(c.clone()),
            NodeData::Element(_) | NodeData::DocumentFragment => Some(
                self.descendants(id)
                    .filter_map(|n| self.get(n).and_then(Node::as_text))
                    .collect(),
            ),
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling.is_valid().then_some(node.next_sibling);
        Some((id, node))
    }
}

/// Pre-order iterator over a subtree, root included
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = if let Some(child) = self.tree.first_child(current) {
            Some(child)
        } else {
            let mut cursor = current;
            loop {
                if cursor == self.root {
                    break None;
                }
                if let Some(sibling) = self.tree.next_sibling(cursor) {
                    break Some(sibling);
                }
                match self.tree.parent(cursor) {
                    Some(parent) => cursor = parent,
                    None => break None,
                }
            }
        };
        Some(current)
    }
}
