//! Configuration shared by the builder, filter, sorter and renderer

/// Sibling ordering criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Byte order of names
    #[default]
    Name,
    /// Leaf size; directories count as 0 unless `dir_sizes` is on
    Size,
    /// Natural ordering, digit runs compared numerically
    Version,
    /// Last modification time, missing timestamps first
    Time,
}

/// Options controlling how a bucket tree is filtered, ordered and printed.
///
/// Built once per run and passed by reference everywhere; nothing reads
/// options from global state.
#[derive(Debug, Clone, Default)]
pub struct TreeConfig {
    /// Show names starting with `.`
    pub all_files: bool,
    pub dirs_only: bool,
    /// Print the path from the root instead of the bare name
    pub full_path: bool,
    pub byte_size: bool,
    pub human_size: bool,
    pub quote_names: bool,
    pub show_mod_time: bool,
    pub colorize: bool,
    /// Maximum depth below the root, 0 = unlimited
    pub depth_limit: usize,
    pub no_sort: bool,
    pub reverse_sort: bool,
    pub dirs_first: bool,
    pub sort_by: SortBy,
    pub include_pattern: Option<String>,
    pub exclude_pattern: Option<String>,
    pub ignore_case: bool,
    /// Omit indentation guides and connectors
    pub no_indent: bool,
    /// Report directory sizes as the sum of the leaves below them
    pub dir_sizes: bool,
}

impl TreeConfig {
    /// Whether any `[size date]` block is printed before names.
    pub fn has_annotations(&self) -> bool {
        self.byte_size || self.human_size || self.show_mod_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_plain_name_sort() {
        let config = TreeConfig::default();
        assert_eq!(config.sort_by, SortBy::Name);
        assert_eq!(config.depth_limit, 0);
        assert!(!config.has_annotations());
        assert!(!config.no_sort);
    }

    #[test]
    fn test_annotations() {
        let config = TreeConfig {
            show_mod_time: true,
            ..Default::default()
        };
        assert!(config.has_annotations());

        let config = TreeConfig {
            sort_by: SortBy::Size,
            ..Default::default()
        };
        assert!(!config.has_annotations());
    }
}
