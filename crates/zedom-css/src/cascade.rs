//! Style Cascade & Resolver
//!
//! Computes the final styles for DOM elements by:
//! 1. Matching author rules against elements
//! 2. Sorting by importance, origin (inline beats author), specificity and source order
//! 3. Inheriting inherited properties and filling in initial values

use std::collections::HashMap;

use zedom_dom::{DomTree, NodeId};

use crate::{Specificity, Stylesheet};

/// Properties that inherit from the parent when not set
const INHERITED: &[&str] = &[
    "color",
    "cursor",
    "direction",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "letter-spacing",
    "line-height",
    "text-align",
    "visibility",
    "white-space",
];

/// Initial values for the properties the helpers care about
const INITIAL: &[(&str, &str)] = &[
    ("display", "inline"),
    ("height", "auto"),
    ("opacity", "1"),
    ("overflow-x", "visible"),
    ("overflow-y", "visible"),
    ("position", "static"),
    ("visibility", "visible"),
    ("width", "auto"),
];

/// Resolved style of one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    properties: HashMap<String, String>,
}

impl ComputedStyle {
    /// Resolved value of a hyphenated property, empty string when unknown.
    /// `overflow` reads back as `x` when both axes agree and `x y` otherwise.
    pub fn get(&self, property: &str) -> &str {
        if property == "overflow" {
            return "";
        }
        self.properties
            .get(property)
            .map(String::as_str)
            .or_else(|| INITIAL.iter().find(|(p, _)| *p == property).map(|(_, v)| *v))
            .unwrap_or("")
    }

    /// The `overflow` shorthand as `getComputedStyle` serializes it
    pub fn overflow(&self) -> String {
        let x = self.get("overflow-x");
        let y = self.get("overflow-y");
        if x == y {
            x.to_string()
        } else {
            format!("{} {}", x, y)
        }
    }

    /// Set a property, expanding the `overflow` shorthand
    fn apply(&mut self, property: &str, value: &str) {
        if property == "overflow" {
            let mut parts = value.split_ascii_whitespace();
            let x = parts.next().unwrap_or("visible");
            let y = parts.next().unwrap_or(x);
            self.properties.insert("overflow-x".to_string(), x.to_string());
            self.properties.insert("overflow-y".to_string(), y.to_string());
        } else {
            self.properties.insert(property.to_string(), value.to_string());
        }
    }

    /// Length in CSS pixels, `None` for `auto` and non-px values
    pub fn px(&self, property: &str) -> Option<f32> {
        parse_px(self.get(property))
    }
}

/// Parse `12px` / `0` into pixels
pub fn parse_px(value: &str) -> Option<f32> {
    let value = value.trim();
    if value == "0" {
        return Some(0.0);
    }
    value.strip_suffix("px")?.trim().parse().ok()
}

/// Layout box widths as reported by `offsetWidth` / `clientWidth`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxMetrics {
    pub offset_width: f32,
    pub offset_height: f32,
    pub client_width: f32,
    pub client_height: f32,
}

/// Style resolver - computes styles for DOM elements
#[derive(Debug)]
pub struct StyleResolver {
    /// Author stylesheets (page CSS), in source order
    author_styles: Vec<Stylesheet>,
    /// Thickness of a classic (space-reserving) scrollbar, in px
    scrollbar_thickness: f32,
}

struct Candidate<'a> {
    property: &'a str,
    value: &'a str,
    key: (bool, bool, Specificity, usize),
}

impl StyleResolver {
    pub fn new() -> Self {
        Self {
            author_styles: Vec::new(),
            scrollbar_thickness: 17.0,
        }
    }

    /// Same resolver, with the host's scrollbar thickness
    pub fn with_scrollbar_thickness(mut self, px: f32) -> Self {
        self.scrollbar_thickness = px.max(0.0);
        self
    }

    pub fn scrollbar_thickness(&self) -> f32 {
        self.scrollbar_thickness
    }

    /// Add an author stylesheet
    pub fn add_stylesheet(&mut self, stylesheet: Stylesheet) {
        self.author_styles.push(stylesheet);
    }

    pub fn stylesheet_count(&self) -> usize {
        self.author_styles.len()
    }

    /// Compute styles for an element (`getComputedStyle`)
    ///
    /// Non-element nodes resolve to initial values only. Ancestors are
    /// cascaded once each, outermost first.
    pub fn compute_style(&self, tree: &DomTree, node_id: NodeId) -> ComputedStyle {
        let is_element = |id: NodeId| tree.get(id).is_some_and(|n| n.is_element());
        if !is_element(node_id) {
            return ComputedStyle::default();
        }
        let chain: Vec<NodeId> = std::iter::once(node_id)
            .chain(tree.ancestors(node_id).take_while(|&id| is_element(id)))
            .collect();

        let mut style = ComputedStyle::default();
        for &id in chain.iter().rev() {
            let inherited = ComputedStyle {
                properties: style
                    .properties
                    .into_iter()
                    .filter(|(name, _)| INHERITED.contains(&name.as_str()))
                    .collect(),
            };
            style = self.cascade(tree, id, inherited);
        }
        tracing::trace!(?node_id, depth = chain.len(), properties = style.properties.len(), "computed style");
        style
    }

    /// The element's own cascaded values over initial values, without
    /// inheritance. Enough for non-inherited properties such as `overflow`.
    pub fn cascaded_style(&self, tree: &DomTree, node_id: NodeId) -> ComputedStyle {
        self.cascade(tree, node_id, ComputedStyle::default())
    }

    /// Apply the winning declarations for `node_id` on top of `style`
    fn cascade(&self, tree: &DomTree, node_id: NodeId, mut style: ComputedStyle) -> ComputedStyle {
        let Some(elem) = tree.get(node_id).and_then(|n| n.as_element()) else {
            return style;
        };

        let mut candidates: Vec<Candidate<'_>> = Vec::new();
        let mut order = 0usize;
        for sheet in &self.author_styles {
            for rule in &sheet.rules {
                let specificity = rule.selectors.matching_specificity(tree, node_id);
                for decl in &rule.declarations {
                    order += 1;
                    if let Some(specificity) = specificity {
                        candidates.push(Candidate {
                            property: &decl.property,
                            value: &decl.value,
                            key: (decl.important, false, specificity, order),
                        });
                    }
                }
            }
        }
        for decl in elem.style().iter() {
            order += 1;
            candidates.push(Candidate {
                property: &decl.property,
                value: &decl.value,
                key: (decl.important, true, Specificity::default(), order),
            });
        }
        candidates.sort_by(|a, b| a.key.cmp(&b.key));

        for candidate in candidates {
            style.apply(candidate.property, candidate.value);
        }
        style
    }

    /// Box widths of an element. Only explicit px sizes are known; a
    /// `scroll` overflow reserves scrollbar space inside the padding box.
    pub fn box_metrics(&self, tree: &DomTree, node_id: NodeId) -> BoxMetrics {
        let style = self.compute_style(tree, node_id);
        if style.get("display") == "none" {
            return BoxMetrics::default();
        }
        let side = |name: &str| style.px(name).unwrap_or(0.0);
        let padding_x = side("padding-left") + side("padding-right");
        let padding_y = side("padding-top") + side("padding-bottom");
        let border_x = side("border-left-width") + side("border-right-width");
        let border_y = side("border-top-width") + side("border-bottom-width");
        let width = style.px("width").unwrap_or(0.0);
        let height = style.px("height").unwrap_or(0.0);

        let (content_box, scrollbar) = (style.get("box-sizing") != "border-box", self.scrollbar_thickness);
        let offset_width = if content_box { width + padding_x + border_x } else { width.max(padding_x + border_x) };
        let offset_height = if content_box { height + padding_y + border_y } else { height.max(padding_y + border_y) };

        let vertical_bar = if style.get("overflow-y") == "scroll" { scrollbar } else { 0.0 };
        let horizontal_bar = if style.get("overflow-x") == "scroll" { scrollbar } else { 0.0 };

        BoxMetrics {
            offset_width,
            offset_height,
            client_width: (offset_width - border_x - vertical_bar).max(0.0),
            client_height: (offset_height - border_y - horizontal_bar).max(0.0),
        }
    }
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new()
    }
}
