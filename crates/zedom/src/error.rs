//! Error types

use zedom_css::{CssError, SelectorError};
use zedom_dom::DomError;
use zedom_html::HtmlError;

/// Errors surfaced by the helpers. Missing inputs never produce one; these
/// are failures of the underlying DOM, selector, CSS or HTML layer.
#[derive(Debug, thiserror::Error)]
pub enum ZedomError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error(transparent)]
    Css(#[from] CssError),

    #[error(transparent)]
    Html(#[from] HtmlError),
}

pub type Result<T> = std::result::Result<T, ZedomError>;
