//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to our DOM format.

use html5ever::tendril::TendrilSink;
use html5ever::{local_name, ns, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use zedom_dom::{Document, DomTree, Namespace, Node, NodeId, QualName};

use crate::HtmlError;

/// HTML5 parser
#[derive(Debug, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, HtmlError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, HtmlError> {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = html5ever::parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let mut document = Document::empty(url);
        let root = document.root();
        for child in dom.document.children.borrow().iter() {
            self.convert_node(child, document.tree_mut(), root)?;
        }

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    /// Parse markup in `<template>` context, so table parts and `<option>`
    /// are kept where a `<body>` context would drop them.
    ///
    /// Returns a detached DocumentFragment holding every top-level node,
    /// whitespace text and comments included.
    pub fn parse_fragment(&self, doc: &mut Document, html: &str) -> Result<NodeId, HtmlError> {
        let context = html5ever::QualName::new(None, ns!(html), local_name!("template"));
        let dom = html5ever::parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new(), false)
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let fragment = doc.create_document_fragment();
        // The fragment parser wraps its output in a synthetic <html> element
        let wrappers = dom.document.children.borrow();
        for wrapper in wrappers.iter() {
            for child in wrapper.children.borrow().iter() {
                self.convert_node(child, doc.tree_mut(), fragment)?;
            }
        }

        tracing::trace!(nodes = doc.child_nodes(fragment).len(), "parsed fragment");
        Ok(fragment)
    }

    /// Convert an RcDom node (and its subtree) to our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> Result<(), HtmlError> {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent)?;
                }
            }
            RcNodeData::Doctype { name, public_id, system_id } => {
                let id = tree.push(Node::doctype(name.to_string(), public_id.to_string(), system_id.to_string()));
                tree.append_child(parent, id)?;
            }
            RcNodeData::Text { contents } => {
                let id = tree.push(Node::text(contents.borrow().to_string()));
                tree.append_child(parent, id)?;
            }
            RcNodeData::Comment { contents } => {
                let id = tree.push(Node::comment(contents.to_string()));
                tree.append_child(parent, id)?;
            }
            RcNodeData::Element { name, attrs, template_contents, .. } => {
                let qname = QualName::new(Namespace::from_url(&name.ns), name.local.to_string());
                let id = tree.push(Node::element(qname));

                if let Some(elem) = tree.get_mut(id).and_then(Node::as_element_mut) {
                    for attr in attrs.borrow().iter() {
                        let attr_name = match &attr.name.prefix {
                            Some(prefix) => format!("{}:{}", prefix, attr.name.local),
                            None => attr.name.local.to_string(),
                        };
                        elem.set_attr(&attr_name, attr.value.to_string());
                    }
                }
                tree.append_child(parent, id)?;

                // <template> keeps its children in a separate content fragment
                let contents = template_contents.borrow();
                let children = match contents.as_ref() {
                    Some(content) => content.children.borrow().clone(),
                    None => handle.children.borrow().clone(),
                };
                for child in children.iter() {
                    self.convert_node(child, tree, id)?;
                }
            }
            RcNodeData::ProcessingInstruction { .. } => {
                // Not part of HTML documents
            }
        }
        Ok(())
    }
}
