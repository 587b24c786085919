//! CSS Parser using lightningcss
//!
//! Parses author stylesheets into our internal representation. Selectors
//! are re-serialized by lightningcss and handed to our own selector engine;
//! declarations keep their property name and serialized value.

use lightningcss::properties::Property;
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::traits::ToCss;

use crate::{CssError, Declaration, Rule, SelectorList, Stylesheet};

/// CSS Parser
#[derive(Debug, Default)]
pub struct CssParser;

impl CssParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a CSS stylesheet
    pub fn parse(&self, css: &str) -> Result<Stylesheet, CssError> {
        let stylesheet = StyleSheet::parse(css, ParserOptions::default()).map_err(|e| CssError::ParseError {
            line: e.loc.as_ref().map(|l| l.line + 1).unwrap_or(0),
            message: e.kind.to_string(),
        })?;

        let mut result = Stylesheet::default();
        for rule in stylesheet.rules.0.iter() {
            self.convert_rule(rule, &mut result)?;
        }
        tracing::debug!("Parsed stylesheet with {} rules", result.rules.len());
        Ok(result)
    }

    fn convert_rule(&self, rule: &CssRule, out: &mut Stylesheet) -> Result<(), CssError> {
        match rule {
            CssRule::Style(style_rule) => {
                let text = style_rule
                    .selectors
                    .to_css_string(PrinterOptions::default())
                    .map_err(|e| CssError::Serialize(e.to_string()))?;
                let selectors = match SelectorList::parse(&text) {
                    Ok(list) => list,
                    Err(err) => {
                        tracing::warn!("Skipping rule: {}", err);
                        return Ok(());
                    }
                };

                let mut declarations = Vec::new();
                for decl in style_rule.declarations.declarations.iter() {
                    declarations.push(self.convert_declaration(decl, false)?);
                }
                for decl in style_rule.declarations.important_declarations.iter() {
                    declarations.push(self.convert_declaration(decl, true)?);
                }

                out.rules.push(Rule { selector_text: text, selectors, declarations });
                Ok(())
            }
            // Skip other rule types for now (media queries, keyframes, etc.)
            _ => {
                tracing::debug!("Ignoring non-style rule");
                Ok(())
            }
        }
    }

    fn convert_declaration(&self, decl: &Property, important: bool) -> Result<Declaration, CssError> {
        let property = decl.property_id().name().to_string();
        let value = decl
            .value_to_css_string(PrinterOptions::default())
            .map_err(|e| CssError::Serialize(e.to_string()))?;
        Ok(Declaration { property, value, important })
    }
}
