//! Window Configuration

use zedom_dom::ListenerOptions;

/// Window configuration options
#[derive(Debug, Clone)]
pub struct Config {
    /// Document URL
    pub url: String,

    /// Width of a classic scrollbar in px
    pub scrollbar_thickness: f32,

    /// Host elements expose a native `classList`
    pub class_list: bool,

    /// Options used by `on`/`off` when the caller passes none
    pub listener_options: ListenerOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: "about:blank".to_string(),
            scrollbar_thickness: 17.0,
            class_list: true,
            listener_options: ListenerOptions::default(),
        }
    }
}
