//! Window - the host environment the helpers run in
//!
//! Owns the document, the author stylesheets used for computed style, and
//! the registry of delegated listeners installed by `on`.

use zedom_css::{BoxMetrics, ComputedStyle, StyleResolver};
use zedom_dom::{Document, DomFeatures, NodeId};
use zedom_html::HtmlParser;

use crate::events::DelegateRegistry;
use crate::{Config, Result};

/// A document together with its styling and event state
#[derive(Debug)]
pub struct Window {
    document: Document,
    styles: StyleResolver,
    pub(crate) delegates: DelegateRegistry,
    config: Config,
}

impl Window {
    /// Blank `html/head/body` document
    pub fn new(config: Config) -> Self {
        let document = Document::new(&config.url).with_features(DomFeatures { class_list: config.class_list });
        Self::from_document(document, config)
    }

    /// Wrap an existing document. The document keeps its own features.
    pub fn from_document(document: Document, config: Config) -> Self {
        let styles = StyleResolver::new().with_scrollbar_thickness(config.scrollbar_thickness);
        Self {
            document,
            styles,
            delegates: DelegateRegistry::default(),
            config,
        }
    }

    /// Parse a full HTML page. `<style>` elements become author stylesheets.
    pub fn from_html(html: &str, config: Config) -> Result<Self> {
        let document = HtmlParser::new()
            .parse_with_url(html, &config.url)?
            .with_features(DomFeatures { class_list: config.class_list });
        let mut window = Self::from_document(document, config);

        let sheets: Vec<String> = window
            .document
            .tree()
            .descendants(window.document.root())
            .filter(|&n| window.document.local_name(n) == Some("style"))
            .filter_map(|n| window.document.text_content(n))
            .collect();
        for css in sheets {
            window.add_stylesheet(&css)?;
        }
        Ok(window)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn styles(&self) -> &StyleResolver {
        &self.styles
    }

    /// Parse and add an author stylesheet
    pub fn add_stylesheet(&mut self, css: &str) -> Result<()> {
        let sheet = zedom_css::parse_stylesheet(css)?;
        tracing::debug!(rules = sheet.rules.len(), "adding stylesheet");
        self.styles.add_stylesheet(sheet);
        Ok(())
    }

    /// `getComputedStyle(node)`
    pub fn get_computed_style(&self, node: NodeId) -> ComputedStyle {
        self.styles.compute_style(self.document.tree(), node)
    }

    /// `offsetWidth`/`clientWidth` and friends
    pub fn box_metrics(&self, node: NodeId) -> BoxMetrics {
        self.styles.box_metrics(self.document.tree(), node)
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_html_collects_style_elements() {
        let html = "<html><head><style>.box { overflow: auto }</style></head>\
                    <body><div class=\"box\"></div></body></html>";
        let window = Window::from_html(html, Config::default()).unwrap();
        assert_eq!(window.styles().stylesheet_count(), 1);

        let doc = window.document();
        let div = doc.children(doc.body().unwrap())[0];
        assert_eq!(window.get_computed_style(div).get("overflow-y"), "auto");
    }

    #[test]
    fn test_config_reaches_document_and_resolver() {
        let window = Window::new(Config {
            class_list: false,
            scrollbar_thickness: 12.0,
            ..Config::default()
        });
        assert!(!window.document().features().class_list);
        assert_eq!(window.styles().scrollbar_thickness(), 12.0);
        assert_eq!(window.document().url(), "about:blank");
    }
}
