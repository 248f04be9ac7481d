//! Building and querying the bucket tree
//!
//! Keys are parsed into segments (`key`), inserted into an arena tree
//! (`node`, `builder`), and later filtered (`filter`) and ordered (`sort`)
//! per directory while the output layer walks it.

mod builder;
mod config;
mod filter;
mod key;
mod node;
mod sort;
mod utils;

pub use builder::{BuildReport, ObjectRecord, TreeBuilder};
pub use config::{SortBy, TreeConfig};
pub use filter::Filter;
pub use key::{KeyParser, ParsedKey};
pub use node::{Node, NodeId, NodeKind, Tree};
pub use sort::{order, version_cmp};
pub use utils::{MOD_TIME_FORMAT, format_mod_time, format_size};
