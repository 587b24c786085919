//! DOM Node Operations
//!
//! Core node manipulation: appendChild, removeChild, insertBefore.

use crate::{DomTree, NodeData, NodeId};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node {0:?} not found")]
    NotFound(NodeId),
    /// Hierarchy error (e.g., inserting ancestor)
    #[error("Hierarchy request error: {0}")]
    HierarchyRequest(&'static str),
    /// Reference node is not a child of the parent
    #[error("Node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
}

impl DomTree {
    fn node_exists(&self, id: NodeId) -> DomResult<()> {
        if self.contains_id(id) {
            Ok(())
        } else {
            Err(DomError::NotFound(id))
        }
    }

    fn ensure_pre_insert_validity(&self, parent: NodeId, node: NodeId, child: Option<NodeId>) -> DomResult<()> {
        self.node_exists(parent)?;
        self.node_exists(node)?;
        if !self.nodes[parent.index()].can_have_children() {
            return Err(DomError::HierarchyRequest("parent cannot have children"));
        }
        if self.contains(node, parent) {
            return Err(DomError::HierarchyRequest("node is an inclusive ancestor of parent"));
        }
        if matches!(self.nodes[node.index()].data, NodeData::Document) {
            return Err(DomError::HierarchyRequest("document cannot be inserted"));
        }
        if let Some(child) = child {
            if self.parent(child) != Some(parent) {
                return Err(DomError::NotAChild { parent, child });
            }
        }
        Ok(())
    }

    /// Unlink a node from its parent and siblings, keeping its subtree
    pub(crate) fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }
        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Link a detached node under `parent`, before `before` or at the end
    fn link_before(&mut self, parent: NodeId, id: NodeId, before: NodeId) {
        let prev = if before.is_valid() {
            self.nodes[before.index()].prev_sibling
        } else {
            self.nodes[parent.index()].last_child
        };
        {
            let node = &mut self.nodes[id.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = before;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = id;
        } else {
            self.nodes[parent.index()].first_child = id;
        }
        if before.is_valid() {
            self.nodes[before.index()].prev_sibling = id;
        } else {
            self.nodes[parent.index()].last_child = id;
        }
    }

    /// `parent.insertBefore(node, child)`; `None` appends
    ///
    /// A node that already has a parent is moved. Inserting a document
    /// fragment moves its children in order and leaves it empty.
    pub fn insert_before(&mut self, parent: NodeId, node: NodeId, child: Option<NodeId>) -> DomResult<NodeId> {
        self.ensure_pre_insert_validity(parent, node, child)?;

        let mut reference = child.unwrap_or(NodeId::NONE);
        if reference == node {
            reference = self.nodes[node.index()].next_sibling;
        }

        if self.nodes[node.index()].is_fragment() {
            let moved: Vec<NodeId> = self.children(node).map(|(id, _)| id).collect();
            for id in moved {
                self.detach(id);
                self.link_before(parent, id, reference);
            }
        } else {
            self.detach(node);
            self.link_before(parent, node, reference);
        }
        tracing::trace!(?parent, ?node, "inserted node");
        Ok(node)
    }

    /// `parent.appendChild(node)`
    pub fn append_child(&mut self, parent: NodeId, node: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, node, None)
    }

    /// `parent.removeChild(child)`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.node_exists(parent)?;
        self.node_exists(child)?;
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        tracing::trace!(?parent, ?child, "removed node");
        Ok(child)
    }

    /// `node.remove()`: detach from whatever parent it has
    pub fn remove(&mut self, node: NodeId) {
        if self.contains_id(node) {
            self.detach(node);
        }
    }
}
