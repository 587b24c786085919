//! zedom CSS: selectors, stylesheets and computed style
//!
//! Selector matching against the zedom-dom arena, author stylesheet parsing
//! through lightningcss, and a small cascade that answers `getComputedStyle`.

mod cascade;
mod parser;
mod query;
mod selectors;

pub use cascade::{parse_px, BoxMetrics, ComputedStyle, StyleResolver};
pub use parser::CssParser;
pub use query::{closest, matches, query_selector, query_selector_all};
pub use selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector, NthExpression,
    PseudoClass, SelectorComponent, SelectorError, SelectorList,
};

/// Parse a CSS stylesheet
pub fn parse_stylesheet(css: &str) -> Result<Stylesheet, CssError> {
    CssParser::new().parse(css)
}

/// Parsed stylesheet
#[derive(Debug, Default)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

/// CSS style rule
#[derive(Debug)]
pub struct Rule {
    /// Selector list as serialized by the parser
    pub selector_text: String,
    pub selectors: SelectorList,
    pub declarations: Vec<Declaration>,
}

/// Selector specificity (a, b, c)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// CSS declaration (property: value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

/// CSS parsing error
#[derive(Debug, thiserror::Error)]
pub enum CssError {
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: u32, message: String },

    #[error("Failed to serialize CSS: {0}")]
    Serialize(String),
}
