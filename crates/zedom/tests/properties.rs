//! Behavioural tests for the zedom helpers
//!
//! Classes, sibling queries, tree mutation and the scroll-parent walk
//! exercised end to end on parsed documents.

use zedom::{
    add_after, add_before, add_class, append, get_index, get_scroll_parent, get_siblings, has_class, prepend,
    remove_class, set_style, to_element, ClassArg, Config, NodeArg, NodeId, Window,
};
use zedom_dom::{Document, DomFeatures};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn documents() -> Vec<Document> {
    vec![
        Document::default(),
        Document::default().with_features(DomFeatures { class_list: false }),
    ]
}

#[test]
fn test_add_class_then_has_class() {
    init_tracing();
    for mut doc in documents() {
        let el = doc.create_element("div");
        add_class(
            &mut doc,
            el,
            [ClassArg::from(" a  b "), ClassArg::from(["c", "d e"]), ClassArg::from("")],
        );
        for token in ["a", "b", "c", "d", "e"] {
            assert!(has_class(&doc, el, token), "missing {} (class_list: {})", token, doc.features().class_list);
        }
    }
}

#[test]
fn test_remove_class_keeps_rest_in_order() {
    for mut doc in documents() {
        let el = doc.create_element("div");
        doc.set_attribute(el, "class", "class1 class2 class3 class4 class5");
        remove_class(&mut doc, el, ["class2", "class4"]);

        assert!(!has_class(&doc, el, "class2"));
        assert!(!has_class(&doc, el, "class4"));
        assert_eq!(doc.get_attribute(el, "class"), Some("class1 class3 class5"));
    }
}

#[test]
fn test_remove_class_messy_attribute() {
    for mut doc in documents() {
        let el = doc.create_element("div");
        doc.set_attribute(el, "class", " class1  class2  class3 ");
        remove_class(&mut doc, el, ["class2"]);
        assert_eq!(doc.get_attribute(el, "class"), Some("class1 class3"));
    }
}

#[test]
fn test_get_index_covers_all_positions() {
    let mut doc = Document::default();
    let parent = doc.create_element("ul");
    let mut items = Vec::new();
    for i in 0..5 {
        if i % 2 == 0 {
            let text = doc.create_text_node("\n");
            doc.append_child(parent, text).unwrap();
        }
        let li = doc.create_element("li");
        doc.append_child(parent, li).unwrap();
        items.push(li);
    }

    let mut indices: Vec<isize> = items.iter().map(|&li| get_index(&doc, li)).collect();
    indices.sort();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);

    doc.remove_child(parent, items[2]).unwrap();
    assert_eq!(get_index(&doc, items[2]), -1);
    assert_eq!(get_index(&doc, items[3]), 2);
}

#[test]
fn test_get_siblings_skips_self_and_non_elements() {
    let mut doc = Document::default();
    let parent = to_element(&mut doc, "<div><a></a> text <!-- c --><b></b>\n<i></i></div>", NodeArg::None)
        .unwrap()
        .unwrap();
    let elements = doc.children(parent);
    assert_eq!(elements.len(), 3);

    let siblings = get_siblings(&doc, elements[1]);
    assert_eq!(siblings, vec![elements[0], elements[2]]);
    assert!(siblings.iter().all(|&s| doc.is_element(s)));
}

#[test]
fn test_append_and_prepend_ordering() {
    let mut doc = Document::default();
    let parent = doc.create_element("div");
    let existing = doc.create_element("hr");
    doc.append_child(parent, existing).unwrap();

    let [a, b, c] = ["a", "b", "i"].map(|tag| doc.create_element(tag));
    append(&mut doc, parent, [a, b, c]).unwrap();
    assert_eq!(doc.child_nodes(parent), vec![existing, a, b, c]);

    let [x, y, z] = ["x", "y", "z"].map(|tag| doc.create_element(tag));
    prepend(&mut doc, parent, vec![NodeArg::from(x), NodeArg::from(vec![y, z])]).unwrap();
    assert_eq!(doc.child_nodes(parent), vec![z, y, x, existing, a, b, c]);
}

#[test]
fn test_prepend_moves_attached_nodes() {
    let mut doc = Document::default();
    let first = doc.create_element("div");
    let second = doc.create_element("div");
    let moving = doc.create_element("span");
    doc.append_child(first, moving).unwrap();

    prepend(&mut doc, second, moving).unwrap();
    assert!(doc.child_nodes(first).is_empty());
    assert_eq!(doc.child_nodes(second), vec![moving]);
}

#[test]
fn test_add_after_then_add_before_scenario() {
    let mut doc = Document::default();
    let c = to_element(&mut doc, r#"<div id="c"><div id="a"></div><div id="b"></div></div>"#, NodeArg::None)
        .unwrap()
        .unwrap();
    let body = doc.body().unwrap();
    doc.append_child(body, c).unwrap();
    let a = doc.get_element_by_id("a").unwrap();
    let b = doc.get_element_by_id("b").unwrap();

    let new_el = doc.create_element("p");
    assert_eq!(add_after(&mut doc, a, new_el).unwrap(), Some(new_el));
    assert_eq!(doc.children(c), vec![a, new_el, b]);

    let new_el2 = doc.create_element("p");
    assert_eq!(add_before(&mut doc, b, new_el2).unwrap(), Some(new_el2));
    assert_eq!(doc.children(c), vec![a, new_el, new_el2, b]);
}

fn nested(window: &mut Window) -> (NodeId, NodeId, NodeId) {
    let doc = window.document_mut();
    let body = doc.body().unwrap();
    let outer = doc.create_element("section");
    let hidden = doc.create_element("div");
    let leaf = doc.create_element("span");
    doc.append_child(body, outer).unwrap();
    doc.append_child(outer, hidden).unwrap();
    doc.append_child(hidden, leaf).unwrap();
    set_style(doc, hidden, ("overflow", "hidden"));
    (outer, hidden, leaf)
}

#[test]
fn test_scroll_parent_skips_hidden() {
    let mut window = Window::default();
    let (outer, _, leaf) = nested(&mut window);

    // nothing scrollable: falls through to the document
    assert_eq!(get_scroll_parent(&window, leaf), Some(window.document().root()));

    set_style(window.document_mut(), outer, ("overflow-y", "auto"));
    assert_eq!(get_scroll_parent(&window, leaf), Some(outer));
    assert_eq!(get_scroll_parent(&window, None), None);
}

#[test]
fn test_scroll_parent_from_stylesheet() {
    let mut window = Window::default();
    let (outer, _, leaf) = nested(&mut window);
    window.document_mut().set_attribute(outer, "class", "panel");
    window.add_stylesheet(".panel { overflow-y: scroll }").unwrap();

    assert_eq!(get_scroll_parent(&window, leaf), Some(outer));
}

#[test]
fn test_window_from_html() {
    let html = r#"<!DOCTYPE html>
        <html><head><style>#list { overflow: scroll }</style></head>
        <body><ul id="list"><li>one</li><li>two</li></ul></body></html>"#;
    let window = Window::from_html(html, Config::default()).unwrap();
    let doc = window.document();
    let list = doc.get_element_by_id("list").unwrap();
    let item = doc.children(list)[1];

    assert_eq!(get_scroll_parent(&window, item), Some(list));
    assert_eq!(get_index(doc, item), 1);
}
