//! Class-name helpers: `add_class`, `remove_class`, `has_class`
//!
//! Two implementations sit behind [`ClassNames`]: the native token list and
//! a string-based fallback for hosts without `classList`. The document's
//! [`DomFeatures`](zedom_dom::DomFeatures) picks one.

use zedom_dom::{ClassList, Document, ElementData, NodeId};

use crate::internal::{merge_class, split_class, ClassArg};

/// Class set operations on one element
pub trait ClassNames {
    fn add(&self, elem: &mut ElementData, tokens: &[String]);
    fn remove(&self, elem: &mut ElementData, tokens: &[String]);
    fn contains(&self, elem: &ElementData, token: &str) -> bool;
}

/// `element.classList`
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeClassList;

impl ClassNames for NativeClassList {
    fn add(&self, elem: &mut ElementData, tokens: &[String]) {
        let mut list = elem.class_list();
        list.add(tokens);
        write_back(elem, &list);
    }

    fn remove(&self, elem: &mut ElementData, tokens: &[String]) {
        let mut list = elem.class_list();
        list.remove(tokens);
        write_back(elem, &list);
    }

    fn contains(&self, elem: &ElementData, token: &str) -> bool {
        elem.class_list().contains(token)
    }
}

/// DOMTokenList update steps: an absent attribute stays absent when the set
/// is empty
fn write_back(elem: &mut ElementData, list: &ClassList) {
    if list.is_empty() && !elem.has_attr("class") {
        return;
    }
    elem.set_class_list(list);
}

/// Direct edits of the `class` attribute string
///
/// `add` concatenates without deduplicating.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassAttribute;

impl ClassNames for ClassAttribute {
    fn add(&self, elem: &mut ElementData, tokens: &[String]) {
        let value = format!("{} {}", elem.class_name(), tokens.join(" "));
        elem.set_attr("class", value);
    }

    fn remove(&self, elem: &mut ElementData, tokens: &[String]) {
        let mut padded = format!(" {} ", elem.class_name());
        for token in tokens {
            let needle = format!(" {} ", token);
            while padded.contains(&needle) {
                padded = padded.replace(&needle, " ");
            }
        }
        let remaining = split_class(&padded).join(" ");
        elem.set_attr("class", remaining);
    }

    fn contains(&self, elem: &ElementData, token: &str) -> bool {
        split_class(elem.class_name()).contains(&token)
    }
}

/// The strategy for `doc`'s host
pub fn class_names(doc: &Document) -> &'static dyn ClassNames {
    if doc.features().class_list {
        &NativeClassList
    } else {
        &ClassAttribute
    }
}

fn tokens<I, A>(classes: I) -> Vec<String>
where
    I: IntoIterator<Item = A>,
    A: Into<ClassArg>,
{
    let args: Vec<ClassArg> = classes.into_iter().map(Into::into).collect();
    merge_class(&args)
}

/// Add every token from `classes`. No-op for a missing or non-element node.
///
/// ```ignore
/// add_class(&mut doc, el, ["btn primary", "large"]);
/// add_class(&mut doc, el, [ClassArg::from("a"), ClassArg::from(["b", "c"])]);
/// ```
pub fn add_class<I, A>(doc: &mut Document, el: impl Into<Option<NodeId>>, classes: I)
where
    I: IntoIterator<Item = A>,
    A: Into<ClassArg>,
{
    let Some(el) = el.into() else { return };
    let strategy = class_names(doc);
    let tokens = tokens(classes);
    if let Some(elem) = doc.element_mut(el) {
        strategy.add(elem, &tokens);
    }
}

/// Remove every token from `classes`; the rest keep their order
pub fn remove_class<I, A>(doc: &mut Document, el: impl Into<Option<NodeId>>, classes: I)
where
    I: IntoIterator<Item = A>,
    A: Into<ClassArg>,
{
    let Some(el) = el.into() else { return };
    let strategy = class_names(doc);
    let tokens = tokens(classes);
    if let Some(elem) = doc.element_mut(el) {
        strategy.remove(elem, &tokens);
    }
}

/// Whether `el` carries `class_name`. False for a missing node or empty name.
pub fn has_class(doc: &Document, el: impl Into<Option<NodeId>>, class_name: &str) -> bool {
    let Some(el) = el.into() else { return false };
    if class_name.is_empty() {
        return false;
    }
    doc.element(el)
        .is_some_and(|elem| class_names(doc).contains(elem, class_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use zedom_dom::DomFeatures;

    fn legacy() -> Document {
        Document::default().with_features(DomFeatures { class_list: false })
    }

    #[test]
    fn test_native_add_dedups() {
        let mut doc = Document::default();
        let el = doc.create_element("div");
        doc.set_attribute(el, "class", "existing-class");
        add_class(&mut doc, el, ["existing-class", "new-class"]);
        assert_eq!(doc.get_attribute(el, "class"), Some("existing-class new-class"));
    }

    #[test]
    fn test_fallback_add_concatenates() {
        let mut doc = legacy();
        let el = doc.create_element("div");
        doc.set_attribute(el, "class", "existing-class");
        add_class(&mut doc, el, ["new-class"]);
        assert_eq!(doc.get_attribute(el, "class"), Some("existing-class new-class"));
        assert!(has_class(&doc, el, "new-class"));
    }

    #[test]
    fn test_fallback_remove_keeps_order() {
        let mut doc = legacy();
        let el = doc.create_element("div");
        doc.set_attribute(el, "class", "class1 class2 class1 class3");
        remove_class(&mut doc, el, ["class1"]);
        assert_eq!(doc.get_attribute(el, "class"), Some("class2 class3"));
    }

    #[test]
    fn test_fallback_remove_without_class_attribute() {
        let mut doc = legacy();
        let el = doc.create_element("div");
        remove_class(&mut doc, el, ["class1"]);
        assert_eq!(doc.get_attribute(el, "class"), Some(""));
        assert!(!has_class(&doc, el, "class1"));
    }

    #[test]
    fn test_native_empty_set_leaves_attribute_absent() {
        let mut doc = Document::default();
        let el = doc.create_element("div");
        remove_class(&mut doc, el, ["x"]);
        add_class(&mut doc, el, [""]);
        assert_eq!(doc.get_attribute(el, "class"), None);

        doc.set_attribute(el, "class", "x");
        remove_class(&mut doc, el, ["x"]);
        assert_eq!(doc.get_attribute(el, "class"), Some(""));
    }

    #[test]
    fn test_has_class_edge_cases() {
        let mut doc = Document::default();
        let el = doc.create_element("div");
        doc.set_attribute(el, "class", "class1   test-class   class2");
        assert!(has_class(&doc, el, "test-class"));
        assert!(!has_class(&doc, el, ""));
        assert!(!has_class(&doc, None, "test-class"));

        let text = doc.create_text_node("x");
        assert!(!has_class(&doc, text, "x"));
    }

    #[test]
    fn test_missing_element_is_noop() {
        let mut doc = Document::default();
        add_class(&mut doc, None, ["a"]);
        remove_class(&mut doc, None, ["a"]);
    }
}
