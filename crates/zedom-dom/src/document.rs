//! Document - High-level document API

use crate::events::EventTargets;
use crate::{DomResult, DomTree, ElementData, Node, NodeData, NodeId, NodeType, QualName};

/// Capabilities of the host the document runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomFeatures {
    /// Elements expose a native `classList`
    pub class_list: bool,
}

impl Default for DomFeatures {
    fn default() -> Self {
        Self { class_list: true }
    }
}

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    features: DomFeatures,
    pub(crate) events: EventTargets,
}

impl Document {
    /// Create a new document with `<html><head></head><body></body></html>`
    pub fn new(url: &str) -> Self {
        let mut document = Self::empty(url);

        let html = document.create_element("html");
        let head = document.create_element("head");
        let body = document.create_element("body");

        let root = document.tree.root();
        // Freshly created nodes under the document root cannot violate hierarchy rules
        let _ = document.tree.append_child(root, html);
        let _ = document.tree.append_child(html, head);
        let _ = document.tree.append_child(html, body);
        document
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            features: DomFeatures::default(),
            events: EventTargets::default(),
        }
    }

    /// Same document, with the given host capabilities
    pub fn with_features(mut self, features: DomFeatures) -> Self {
        self.features = features;
        self
    }

    pub fn features(&self) -> DomFeatures {
        self.features
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The document node itself
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    // ------------------------------------------------------------------
    // Node creation
    // ------------------------------------------------------------------

    /// `document.createElement(tag)`
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.push(Node::element(QualName::html(tag)))
    }

    /// `document.createElementNS(ns, tag)`
    pub fn create_element_ns(&mut self, name: QualName) -> NodeId {
        self.tree.push(Node::element(name))
    }

    /// `document.createTextNode(text)`
    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.tree.push(Node::text(text))
    }

    /// `document.createComment(text)`
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.tree.push(Node::comment(text))
    }

    /// `document.createDocumentFragment()`
    pub fn create_document_fragment(&mut self) -> NodeId {
        self.tree.push(Node::fragment())
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// `<html>` element
    pub fn document_element(&self) -> Option<NodeId> {
        self.tree.element_children(self.root()).next()
    }

    fn html_child(&self, name: &str) -> Option<NodeId> {
        let html = self.document_element()?;
        self.tree
            .element_children(html)
            .find(|&id| self.local_name(id) == Some(name))
    }

    /// `<head>` element
    pub fn head(&self) -> Option<NodeId> {
        self.html_child("head")
    }

    /// `<body>` element
    pub fn body(&self) -> Option<NodeId> {
        self.html_child("body")
    }

    /// Get element by ID (first match in document order)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.root())
            .find(|&n| self.element(n).and_then(ElementData::id) == Some(id))
    }

    /// Get document title
    pub fn title(&self) -> String {
        self.head()
            .and_then(|head| {
                self.tree
                    .element_children(head)
                    .find(|&id| self.local_name(id) == Some("title"))
            })
            .and_then(|title| self.tree.text_content(title))
            .map(|t| t.trim().to_string())
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Node accessors
    // ------------------------------------------------------------------

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.get(id)
    }

    /// `nodeType`
    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        self.tree.get(id).map(Node::node_type)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.tree.get(id).is_some_and(Node::is_element)
    }

    /// Element data, `None` for other node kinds
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.tree.get(id).and_then(Node::as_element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.tree.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Lowercase local name of an element
    pub fn local_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(ElementData::local_name)
    }

    /// `tagName`
    pub fn tag_name(&self, id: NodeId) -> Option<String> {
        self.element(id).map(ElementData::tag_name)
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.get_attr(name))
    }

    /// Set an attribute; ignored for non-elements
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(elem) = self.element_mut(id) {
            elem.set_attr(name, value);
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(elem) = self.element_mut(id) {
            elem.remove_attr(name);
        }
    }

    /// `textContent`
    pub fn text_content(&self, id: NodeId) -> Option<String> {
        self.tree.text_content(id)
    }

    /// `textContent = text`: replaces all children with one text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        match &mut node.data {
            NodeData::Text(t) => {
                t.content = text.to_string();
                return;
            }
            NodeData::Comment(c) => {
                *c = text.to_string();
                return;
            }
            NodeData::Document | NodeData::Doctype { .. } => return,
            NodeData::Element(_) | NodeData::DocumentFragment => {}
        }

        while let Some(child) = self.tree.last_child(id) {
            self.tree.detach(child);
        }
        if !text.is_empty() {
            let text_node = self.create_text_node(text);
            let _ = self.tree.append_child(id, text_node);
        }
    }

    // ------------------------------------------------------------------
    // Tree mutation shortcuts
    // ------------------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    /// Element children (`children`)
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree.element_children(id).collect()
    }

    /// All child nodes (`childNodes`)
    pub fn child_nodes(&self, id: NodeId) -> Vec<NodeId> {
        self.tree.children(id).map(|(child, _)| child).collect()
    }

    pub fn append_child(&mut self, parent: NodeId, node: NodeId) -> DomResult<NodeId> {
        self.tree.append_child(parent, node)
    }

    pub fn insert_before(&mut self, parent: NodeId, node: NodeId, child: Option<NodeId>) -> DomResult<NodeId> {
        self.tree.insert_before(parent, node, child)
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.remove_child(parent, child)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
