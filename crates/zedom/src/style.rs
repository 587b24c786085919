//! Inline style helpers: `get_style`, `set_style`

use zedom_dom::{Document, NodeId};

use crate::internal::{camelize, each, Collection, Key};

/// Style argument: a single property or an ordered property map.
/// A `None` value removes the property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleArg {
    Property(String, Option<String>),
    Map(Vec<(String, Option<String>)>),
}

impl From<(&str, &str)> for StyleArg {
    fn from((name, value): (&str, &str)) -> Self {
        Self::Property(name.to_string(), Some(value.to_string()))
    }
}

impl From<(&str, Option<&str>)> for StyleArg {
    fn from((name, value): (&str, Option<&str>)) -> Self {
        Self::Property(name.to_string(), value.map(str::to_string))
    }
}

impl From<(&str, String)> for StyleArg {
    fn from((name, value): (&str, String)) -> Self {
        Self::Property(name.to_string(), Some(value))
    }
}

impl From<Vec<(&str, &str)>> for StyleArg {
    fn from(map: Vec<(&str, &str)>) -> Self {
        Self::Map(
            map.into_iter()
                .map(|(k, v)| (k.to_string(), Some(v.to_string())))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, &str); N]> for StyleArg {
    fn from(map: [(&str, &str); N]) -> Self {
        Self::from(Vec::from(map))
    }
}

/// Inline style value of `name` (kebab or camel case).
///
/// `None` for a missing node, a non-element or an empty name; an unset
/// property reads as `""`. This is not computed style.
pub fn get_style(doc: &Document, el: impl Into<Option<NodeId>>, name: &str) -> Option<String> {
    let el = el.into()?;
    if name.is_empty() {
        return None;
    }
    let elem = doc.element(el)?;
    Some(elem.style().get(&camelize(name)).to_string())
}

/// Set one inline property, or each entry of a map in order (last write
/// wins). `None` or `""` removes the property.
///
/// ```ignore
/// set_style(&mut doc, el, ("font-size", "12px"));
/// set_style(&mut doc, el, [("color", "red"), ("marginTop", "4px")]);
/// ```
pub fn set_style(doc: &mut Document, el: impl Into<Option<NodeId>>, styles: impl Into<StyleArg>) {
    let Some(el) = el.into() else { return };
    match styles.into() {
        StyleArg::Map(entries) => {
            each(Collection::Keyed(&entries), |value, key| {
                if let Key::Name(name) = key {
                    set_style(doc, el, StyleArg::Property(name.to_string(), value.clone()));
                }
            });
        }
        StyleArg::Property(name, value) => {
            let camel = camelize(&name);
            if let Some(elem) = doc.element_mut(el) {
                tracing::trace!(?el, property = %camel, "set style");
                elem.update_style(|style| style.set_camel(&camel, value.as_deref().unwrap_or("")));
            }
        }
    }
}
