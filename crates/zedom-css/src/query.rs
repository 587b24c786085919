//! Element Query and Methods
//!
//! querySelector, querySelectorAll, closest, matches.

use zedom_dom::{DomTree, NodeId};

use crate::{SelectorError, SelectorList};

/// `element.matches(selector)`; non-elements never match
pub fn matches(tree: &DomTree, element: NodeId, selector: &str) -> Result<bool, SelectorError> {
    let list = SelectorList::parse(selector)?;
    Ok(list.matches(tree, element))
}

/// `element.closest(selector)`: nearest inclusive ancestor that matches
pub fn closest(tree: &DomTree, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
    let list = SelectorList::parse(selector)?;
    Ok(std::iter::once(element)
        .chain(tree.ancestors(element))
        .find(|&n| list.matches(tree, n)))
}

/// `root.querySelector(selector)`: first matching descendant in document order
pub fn query_selector(tree: &DomTree, root: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
    let list = SelectorList::parse(selector)?;
    Ok(tree.descendants(root).skip(1).find(|&n| list.matches(tree, n)))
}

/// `root.querySelectorAll(selector)`
pub fn query_selector_all(tree: &DomTree, root: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
    let list = SelectorList::parse(selector)?;
    Ok(tree
        .descendants(root)
        .skip(1)
        .filter(|&n| list.matches(tree, n))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zedom_dom::Document;

    fn fixture() -> (Document, Vec<NodeId>) {
        // <div id=c class=wrap><p class=a><span class=b/></p><p/></div>
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        let c = doc.create_element("div");
        doc.set_attribute(c, "id", "c");
        doc.set_attribute(c, "class", "wrap");
        let p1 = doc.create_element("p");
        doc.set_attribute(p1, "class", "a");
        let span = doc.create_element("span");
        doc.set_attribute(span, "class", "b");
        let p2 = doc.create_element("p");
        doc.append_child(body, c).unwrap();
        doc.append_child(c, p1).unwrap();
        doc.append_child(p1, span).unwrap();
        doc.append_child(c, p2).unwrap();
        (doc, vec![c, p1, span, p2])
    }

    #[test]
    fn test_matches_combinators() {
        let (doc, ids) = fixture();
        let tree = doc.tree();
        assert!(matches(tree, ids[2], "#c span.b").unwrap());
        assert!(matches(tree, ids[2], ".wrap > .a > .b").unwrap());
        assert!(!matches(tree, ids[2], ".wrap > .b").unwrap());
        assert!(matches(tree, ids[3], "p.a + p").unwrap());
        assert!(matches(tree, ids[3], ".a ~ p:last-child").unwrap());
        assert!(matches(tree, ids[1], "p:not(:last-child)").unwrap());
        assert!(matches(tree, doc.document_element().unwrap(), ":root").unwrap());
    }

    #[test]
    fn test_closest() {
        let (doc, ids) = fixture();
        let tree = doc.tree();
        assert_eq!(closest(tree, ids[2], "p").unwrap(), Some(ids[1]));
        assert_eq!(closest(tree, ids[2], "span").unwrap(), Some(ids[2]));
        assert_eq!(closest(tree, ids[2], "table").unwrap(), None);
    }

    #[test]
    fn test_query_selector_all_document_order() {
        let (doc, ids) = fixture();
        let tree = doc.tree();
        assert_eq!(query_selector_all(tree, ids[0], "p, span").unwrap(), vec![ids[1], ids[2], ids[3]]);
        assert_eq!(query_selector(tree, ids[0], "p").unwrap(), Some(ids[1]));
        // root itself is excluded
        assert_eq!(query_selector(tree, ids[0], "#c").unwrap(), None);
    }

    #[test]
    fn test_invalid_selector_propagates() {
        let (doc, ids) = fixture();
        assert!(matches(doc.tree(), ids[0], "p[").is_err());
        assert!(query_selector_all(doc.tree(), ids[0], "").is_err());
    }
}
