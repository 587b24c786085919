//! Node arguments for the tree mutators

use zedom_dom::NodeId;

/// A node argument: one node, a nested sequence of arguments, or nothing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeArg {
    #[default]
    None,
    Node(NodeId),
    Nodes(Vec<NodeArg>),
}

impl NodeArg {
    /// True when flattening yields no node
    pub fn is_empty(&self) -> bool {
        match self {
            NodeArg::None => true,
            NodeArg::Node(_) => false,
            NodeArg::Nodes(items) => items.iter().all(NodeArg::is_empty),
        }
    }
}

impl From<NodeId> for NodeArg {
    fn from(id: NodeId) -> Self {
        NodeArg::Node(id)
    }
}

impl From<Option<NodeId>> for NodeArg {
    fn from(id: Option<NodeId>) -> Self {
        id.map_or(NodeArg::None, NodeArg::Node)
    }
}

impl From<&[NodeId]> for NodeArg {
    fn from(ids: &[NodeId]) -> Self {
        NodeArg::Nodes(ids.iter().copied().map(NodeArg::Node).collect())
    }
}

impl<T: Into<NodeArg>> From<Vec<T>> for NodeArg {
    fn from(items: Vec<T>) -> Self {
        NodeArg::Nodes(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<NodeArg>, const N: usize> From<[T; N]> for NodeArg {
    fn from(items: [T; N]) -> Self {
        NodeArg::Nodes(items.into_iter().map(Into::into).collect())
    }
}

/// Depth-first flattening into document insertion order, skipping `None`
pub fn flatten(arg: &NodeArg) -> Vec<NodeId> {
    fn walk(arg: &NodeArg, out: &mut Vec<NodeId>) {
        match arg {
            NodeArg::None => {}
            NodeArg::Node(id) => out.push(*id),
            NodeArg::Nodes(items) => {
                for item in items {
                    walk(item, out);
                }
            }
        }
    }

    let mut out = Vec::new();
    walk(arg, &mut out);
    out
}
