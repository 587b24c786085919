//! zedom DOM - Document Object Model
//!
//! Arena-based DOM tree that the zedom helpers operate on: nodes,
//! attributes, class token lists, inline style and event dispatch.

mod classlist;
mod document;
mod events;
mod node;
mod operations;
mod style;
mod tree;

pub use classlist::ClassList;
pub use document::{Document, DomFeatures};
pub use events::{Event, EventListener, EventPhase, EventTargets, ListenerOptions};
pub use node::{Attribute, ElementData, Namespace, Node, NodeData, NodeType, QualName, TextData};
pub use operations::{DomError, DomResult};
pub use style::{hyphenate, CssStyleDeclaration, StyleDeclaration};
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Missing link
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
