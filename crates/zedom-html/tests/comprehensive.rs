//! Comprehensive tests for zedom-html
//!
//! Fragment parsing in template context and whole-document parsing.

use zedom_dom::{Document, Namespace, NodeType};
use zedom_html::{parse_document, parse_fragment, HtmlParser};

#[test]
fn test_parse_minimal_html() {
    let doc = HtmlParser::new().parse("").unwrap();
    // html5ever always synthesizes html/head/body
    assert!(doc.document_element().is_some());
    assert!(doc.body().is_some());
}

#[test]
fn test_parse_doctype_and_attributes() {
    let doc = parse_document(r#"<!DOCTYPE html><body><div id="main" class="a b" data-x="1"></div></body>"#).unwrap();
    let first = doc.child_nodes(doc.root())[0];
    assert_eq!(doc.node_type(first), Some(NodeType::DocumentType));

    let main = doc.get_element_by_id("main").unwrap();
    let elem = doc.element(main).unwrap();
    let names: Vec<&str> = elem.attrs().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["id", "class", "data-x"]);
    assert_eq!(elem.class_list().value(), "a b");
}

#[test]
fn test_fragment_keeps_table_parts() {
    let mut doc = Document::default();
    let fragment = parse_fragment(&mut doc, "<tr><td>1</td><td>2</td></tr>").unwrap();
    let rows = doc.children(fragment);
    assert_eq!(rows.len(), 1);
    assert_eq!(doc.local_name(rows[0]), Some("tr"));
    assert_eq!(doc.children(rows[0]).len(), 2);
}

#[test]
fn test_fragment_keeps_whitespace_and_comments() {
    let mut doc = Document::default();
    let fragment = parse_fragment(&mut doc, "  <p>a</p><!-- note -->\n<p>b</p>").unwrap();
    let kinds: Vec<Option<NodeType>> = doc.child_nodes(fragment).into_iter().map(|n| doc.node_type(n)).collect();
    assert_eq!(
        kinds,
        vec![
            Some(NodeType::Text),
            Some(NodeType::Element),
            Some(NodeType::Comment),
            Some(NodeType::Text),
            Some(NodeType::Element),
        ]
    );
}

#[test]
fn test_fragment_svg_namespace() {
    let mut doc = Document::default();
    let fragment = parse_fragment(&mut doc, r#"<svg viewBox="0 0 10 10"><circle r="4"/></svg>"#).unwrap();
    let svg = doc.children(fragment)[0];
    assert_eq!(doc.element(svg).unwrap().name.ns, Namespace::Svg);
    assert_eq!(doc.get_attribute(svg, "viewBox"), Some("0 0 10 10"));
    let circle = doc.children(svg)[0];
    assert_eq!(doc.local_name(circle), Some("circle"));
}

#[test]
fn test_fragment_tag_names_lowercased() {
    let mut doc = Document::default();
    let fragment = parse_fragment(&mut doc, "<DIV><SPAN>x</SPAN></DIV>").unwrap();
    let div = doc.children(fragment)[0];
    assert_eq!(doc.local_name(div), Some("div"));
    assert_eq!(doc.tag_name(div).as_deref(), Some("DIV"));
}

#[test]
fn test_empty_fragment() {
    let mut doc = Document::default();
    let fragment = parse_fragment(&mut doc, "").unwrap();
    assert!(doc.child_nodes(fragment).is_empty());
}
