//! Scrollbar width probe

use std::sync::OnceLock;

use crate::{set_style, Window};

static SCROLLBAR_WIDTH: OnceLock<u32> = OnceLock::new();

/// Width of a classic scrollbar in px, measured once per process on a
/// detached probe element and cached afterwards.
pub fn get_scrollbar_width(window: &mut Window) -> u32 {
    *SCROLLBAR_WIDTH.get_or_init(|| measure(window))
}

fn measure(window: &mut Window) -> u32 {
    let probe = window.document_mut().create_element("div");
    set_style(
        window.document_mut(),
        probe,
        [
            ("position", "absolute"),
            ("top", "-9999px"),
            ("width", "100px"),
            ("height", "100px"),
            ("overflow", "scroll"),
        ],
    );
    let metrics = window.box_metrics(probe);
    let width = (metrics.offset_width - metrics.client_width).round().max(0.0) as u32;
    tracing::debug!(width, "measured scrollbar width");
    width
}
