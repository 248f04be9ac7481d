//! bucktree - show a bucket listing the way `tree` shows a directory

pub mod error;
pub mod listing;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Result, TreeError};
pub use listing::{ListingError, ListingFormat, read_listing};
pub use output::{Counts, TreeRenderer, write_json};
pub use tree::{
    BuildReport, Filter, KeyParser, ObjectRecord, SortBy, Tree, TreeBuilder, TreeConfig,
};
