//! zedom HTML Parser
//!
//! HTML5 parsing built on html5ever. Markup is parsed into html5ever's
//! RcDom and then copied into a zedom-dom arena.

mod parser;

pub use parser::HtmlParser;

use zedom_dom::{Document, DomError, NodeId};

/// Parse a complete HTML document
pub fn parse_document(html: &str) -> Result<Document, HtmlError> {
    HtmlParser::new().parse(html)
}

/// Parse markup as `<template>` contents into a detached DocumentFragment
/// owned by `doc`
pub fn parse_fragment(doc: &mut Document, html: &str) -> Result<NodeId, HtmlError> {
    HtmlParser::new().parse_fragment(doc, html)
}

/// HTML parsing error
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("Failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to build DOM: {0}")]
    Dom(#[from] DomError),
}
