//! Internal helper layer
//!
//! String and collection utilities shared by the public helpers, and the
//! argument enums that stand in for runtime shape checks.

mod collection;
mod nodes;
mod string;

pub use collection::{each, find_index, flat_map, Collection, Key};
pub use nodes::{flatten, NodeArg};
pub use string::{camelize, merge_class, split_class, trim, ClassArg};
pub use zedom_dom::hyphenate;
