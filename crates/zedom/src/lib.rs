//! zedom - small DOM helpers
//!
//! Class names, inline styles, tree mutation, markup parsing, delegated
//! events and scroll/sibling queries over a zedom-dom [`Document`].
//!
//! Helpers that only touch the tree take a `&Document`/`&mut Document`.
//! Helpers that need computed style or the delegated listener registry
//! take the [`Window`] that owns the document.
//!
//! # Example
//! ```rust,ignore
//! use zedom::{add_class, on, Config, Listen, Window};
//!
//! let mut window = Window::from_html(page, Config::default())?;
//! let list = window.document().get_element_by_id("list").unwrap();
//! add_class(window.document_mut(), list, ["ready"]);
//! on(&mut window, list, "click", Listen::delegate("li", handler), None)?;
//! ```

mod class;
mod config;
mod error;
mod events;
mod markup;
mod scroll;
mod scrollbar;
mod siblings;
mod style;
mod tree;
mod window;

pub mod env;
pub mod internal;

pub use class::{add_class, class_names, has_class, remove_class, ClassAttribute, ClassNames, NativeClassList};
pub use config::Config;
pub use error::{Result, ZedomError};
pub use events::{off, on, DelegateRegistry, Listen};
pub use internal::{ClassArg, NodeArg};
pub use markup::{create_element, to_element};
pub use scroll::get_scroll_parent;
pub use scrollbar::get_scrollbar_width;
pub use siblings::{get_index, get_siblings};
pub use style::{get_style, set_style, StyleArg};
pub use tree::{add_after, add_before, append, prepend, remove_children};
pub use window::Window;

pub use zedom_dom::{Document, Event, EventListener, ListenerOptions, NodeId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
