//! DOM Node - Arena representation
//!
//! Nodes never hold pointers to each other. Every link is a `NodeId`
//! into the owning `DomTree`, with `NodeId::NONE` marking a missing link.

use crate::{ClassList, CssStyleDeclaration, NodeId};

/// Numeric node type codes, as exposed by `Node.nodeType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
}

impl NodeType {
    /// The numeric `nodeType` value
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(name: QualName) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(name)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(TextData { content: content.into() }))
    }

    /// Create a comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Comment(content.into()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Create a document fragment node
    pub fn fragment() -> Self {
        Self::with_data(NodeData::DocumentFragment)
    }

    /// Create a doctype node
    pub fn doctype(name: impl Into<String>, public_id: impl Into<String>, system_id: impl Into<String>) -> Self {
        Self::with_data(NodeData::Doctype {
            name: name.into(),
            public_id: public_id.into(),
            system_id: system_id.into(),
        })
    }

    /// Node type code
    pub fn node_type(&self) -> NodeType {
        match self.data {
            NodeData::Document => NodeType::Document,
            NodeData::Doctype { .. } => NodeType::DocumentType,
            NodeData::DocumentFragment => NodeType::DocumentFragment,
            NodeData::Element(_) => NodeType::Element,
            NodeData::Text(_) => NodeType::Text,
            NodeData::Comment(_) => NodeType::Comment,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    #[inline]
    pub fn is_fragment(&self) -> bool {
        matches!(self.data, NodeData::DocumentFragment)
    }

    /// Whether this node can hold children at all
    pub fn can_have_children(&self) -> bool {
        matches!(
            self.data,
            NodeData::Document | NodeData::DocumentFragment | NodeData::Element(_)
        )
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    /// Lightweight container whose children move on insertion
    DocumentFragment,
    /// Element
    Element(ElementData),
    /// Text content
    Text(TextData),
    /// Comment
    Comment(String),
}

/// Element namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Namespace {
    Html,
    Svg,
    MathMl,
    Other(String),
}

impl Namespace {
    /// Map a namespace URL onto a known namespace
    pub fn from_url(url: &str) -> Self {
        match url {
            "" | "http://www.w3.org/1999/xhtml" => Self::Html,
            "http://www.w3.org/2000/svg" => Self::Svg,
            "http://www.w3.org/1998/Math/MathML" => Self::MathMl,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Qualified element name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualName {
    pub ns: Namespace,
    pub local: String,
}

impl QualName {
    pub fn new(ns: Namespace, local: impl Into<String>) -> Self {
        Self { ns, local: local.into() }
    }

    /// HTML element name; HTML tag names are case-insensitive and stored lowercase
    pub fn html(local: &str) -> Self {
        Self::new(Namespace::Html, local.to_ascii_lowercase())
    }
}

/// Element-specific data
///
/// `class` and `style` are ordinary attributes. The inline style is also kept
/// parsed so property reads do not re-tokenize the attribute.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Tag name (qualified)
    pub name: QualName,
    attrs: Vec<Attribute>,
    style: CssStyleDeclaration,
}

impl ElementData {
    pub fn new(name: QualName) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            style: CssStyleDeclaration::new(),
        }
    }

    /// Local tag name
    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    /// `tagName`: uppercase for HTML elements, as-is otherwise
    pub fn tag_name(&self) -> String {
        match self.name.ns {
            Namespace::Html => self.name.local.to_ascii_uppercase(),
            _ => self.name.local.clone(),
        }
    }

    /// All attributes in insertion order
    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if name == "style" {
            self.style = CssStyleDeclaration::parse(&value);
        }
        // Check if attribute already exists
        for attr in self.attrs.iter_mut() {
            if attr.name == name {
                attr.value = value;
                return;
            }
        }
        // Add new attribute
        self.attrs.push(Attribute { name: name.to_string(), value });
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|a| a.name == name)?;
        if name == "style" {
            self.style = CssStyleDeclaration::new();
        }
        Some(self.attrs.remove(pos).value)
    }

    /// `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Raw `class` attribute (`className`)
    pub fn class_name(&self) -> &str {
        self.get_attr("class").unwrap_or("")
    }

    /// Token view over the `class` attribute
    pub fn class_list(&self) -> ClassList {
        ClassList::from_string(self.class_name())
    }

    /// Write a token list back into the `class` attribute
    pub fn set_class_list(&mut self, list: &ClassList) {
        self.set_attr("class", list.value());
    }

    /// Inline style declaration
    pub fn style(&self) -> &CssStyleDeclaration {
        &self.style
    }

    /// Mutate the inline style and re-serialize it into the `style` attribute
    pub fn update_style<R>(&mut self, f: impl FnOnce(&mut CssStyleDeclaration) -> R) -> R {
        let result = f(&mut self.style);
        let css_text = self.style.css_text();
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == "style") {
            attr.value = css_text;
        } else if !css_text.is_empty() {
            self.attrs.push(Attribute { name: "style".to_string(), value: css_text });
        }
        result
    }
}

/// Text node data
#[derive(Debug, Clone)]
pub struct TextData {
    pub content: String,
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_codes() {
        assert_eq!(Node::document().node_type().code(), 9);
        assert_eq!(Node::element(QualName::html("div")).node_type().code(), 1);
        assert_eq!(Node::text("x").node_type().code(), 3);
        assert_eq!(Node::comment("x").node_type().code(), 8);
        assert_eq!(Node::fragment().node_type().code(), 11);
    }

    #[test]
    fn test_attributes_keep_order() {
        let mut elem = ElementData::new(QualName::html("DIV"));
        elem.set_attr("id", "main");
        elem.set_attr("class", "a b");
        elem.set_attr("id", "other");

        assert_eq!(elem.local_name(), "div");
        assert_eq!(elem.tag_name(), "DIV");
        assert_eq!(elem.attrs()[0].name, "id");
        assert_eq!(elem.id(), Some("other"));
        assert_eq!(elem.remove_attr("class"), Some("a b".to_string()));
        assert_eq!(elem.class_name(), "");
    }

    #[test]
    fn test_style_attribute_sync() {
        let mut elem = ElementData::new(QualName::html("div"));
        elem.set_attr("style", "color: red; width: 10px");
        assert_eq!(elem.style().get_property_value("color"), "red");

        elem.update_style(|s| s.set_property("width", "20px"));
        assert_eq!(elem.get_attr("style"), Some("color: red; width: 20px;"));
    }
}
