//! Tree formatting and display
//!
//! - `tree` - text renderer with guides, annotations and the footer
//! - `json` - the same traversal as a JSON document
//! - `utils` - filtering/ordering of children and prefix helpers

mod json;
mod tree;
mod utils;

pub use json::{JsonEntry, json_entries, write_json};
pub use tree::{Counts, TreeRenderer};
pub use utils::{VisibleChild, continuation_prefix, join_path, visible_children};
