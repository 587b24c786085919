//! Comprehensive tests for zedom-css
//!
//! Stylesheet parsing, selector queries and the cascade running against a
//! real zedom-dom tree.

use zedom_css::{closest, parse_stylesheet, query_selector_all, SelectorList, Specificity, StyleResolver};
use zedom_dom::{Document, NodeId};

/// <div id="app" class="scroller"><ul><li class="item first"/>...</ul></div>
fn build_list(n: usize) -> (Document, NodeId, Vec<NodeId>) {
    let mut doc = Document::default();
    let body = doc.body().unwrap();
    let app = doc.create_element("div");
    doc.set_attribute(app, "id", "app");
    doc.set_attribute(app, "class", "scroller");
    let ul = doc.create_element("ul");
    doc.append_child(body, app).unwrap();
    doc.append_child(app, ul).unwrap();
    let items = (0..n)
        .map(|i| {
            let li = doc.create_element("li");
            doc.set_attribute(li, "class", if i == 0 { "item first" } else { "item" });
            doc.set_attribute(li, "data-index", &i.to_string());
            doc.append_child(ul, li).unwrap();
            li
        })
        .collect();
    (doc, app, items)
}

#[test]
fn test_structural_queries() {
    let (doc, app, items) = build_list(5);
    let tree = doc.tree();

    assert_eq!(query_selector_all(tree, app, "li:nth-child(odd)").unwrap(), vec![items[0], items[2], items[4]]);
    assert_eq!(query_selector_all(tree, app, "li:nth-last-child(1)").unwrap(), vec![items[4]]);
    assert_eq!(query_selector_all(tree, app, "[data-index^='3']").unwrap(), vec![items[3]]);
    assert_eq!(query_selector_all(tree, app, ".item.first ~ .item").unwrap().len(), 4);
    assert_eq!(closest(tree, items[3], "#app").unwrap(), Some(app));
}

#[test]
fn test_specificity_ordering() {
    let id = SelectorList::parse("#app").unwrap().selectors[0].specificity();
    let class = SelectorList::parse(".scroller li.item").unwrap().selectors[0].specificity();
    assert_eq!(id, Specificity(1, 0, 0));
    assert_eq!(class, Specificity(0, 2, 1));
    assert!(id > class);
}

#[test]
fn test_cascade_source_order_and_specificity() {
    let (doc, app, items) = build_list(2);
    let mut resolver = StyleResolver::new();
    resolver.add_stylesheet(
        parse_stylesheet(
            "#app { overflow-y: auto }
             .scroller { overflow-y: hidden }
             li { color: black }
             li.item { color: navy }
             li { color: gray }",
        )
        .unwrap(),
    );
    assert_eq!(resolver.stylesheet_count(), 1);

    let tree = doc.tree();
    // id wins over the later class rule
    assert_eq!(resolver.compute_style(tree, app).get("overflow-y"), "auto");
    // higher specificity beats source order
    assert_eq!(resolver.compute_style(tree, items[1]).get("color"), "navy");
}

#[test]
fn test_computed_overflow_reads_shorthand() {
    let (mut doc, app, _) = build_list(1);
    doc.set_attribute(app, "style", "overflow-x: hidden; overflow-y: scroll");
    let style = StyleResolver::new().compute_style(doc.tree(), app);
    assert_eq!(style.overflow(), "hidden scroll");

    doc.set_attribute(app, "style", "overflow: auto");
    let style = StyleResolver::new().compute_style(doc.tree(), app);
    assert_eq!(style.overflow(), "auto");
}

#[test]
fn test_display_none_has_no_box() {
    let (mut doc, app, _) = build_list(1);
    doc.set_attribute(app, "style", "display: none; width: 40px");
    let metrics = StyleResolver::new().box_metrics(doc.tree(), app);
    assert_eq!(metrics.offset_width, 0.0);
}
