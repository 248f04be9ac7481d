//! Per-node inclusion rules applied during traversal

use glob::{MatchOptions, Pattern};

use crate::error::{Result, TreeError};

use super::config::TreeConfig;
use super::node::{NodeId, Tree};

/// Visibility, type, depth and glob rules compiled from a `TreeConfig`.
#[derive(Debug, Clone)]
pub struct Filter {
    all_files: bool,
    dirs_only: bool,
    depth_limit: usize,
    full_path: bool,
    include: Option<Pattern>,
    exclude: Option<Pattern>,
    options: MatchOptions,
}

impl Filter {
    /// Compile the configured patterns. Fails before any traversal starts
    /// if a pattern is invalid.
    pub fn new(config: &TreeConfig) -> Result<Self> {
        Ok(Self {
            all_files: config.all_files,
            dirs_only: config.dirs_only,
            depth_limit: config.depth_limit,
            full_path: config.full_path,
            include: compile(config.include_pattern.as_deref())?,
            exclude: compile(config.exclude_pattern.as_deref())?,
            options: MatchOptions {
                case_sensitive: !config.ignore_case,
                require_literal_separator: false,
                require_literal_leading_dot: false,
            },
        })
    }

    /// Whether the node at `depth` (root = 0) is shown. `path` is relative
    /// to the root and is what patterns see in full-path mode.
    ///
    /// Exclusion applies to every node and beats inclusion. Inclusion only
    /// narrows leaves, so directories stay reachable.
    pub fn includes(&self, tree: &Tree, id: NodeId, path: &str, depth: usize) -> bool {
        if self.depth_limit > 0 && depth > self.depth_limit {
            return false;
        }

        let node = tree.node(id);
        if !self.all_files && node.name.starts_with('.') {
            return false;
        }
        if self.dirs_only && !node.is_dir() {
            return false;
        }

        let subject = if self.full_path { path } else { node.name.as_str() };
        if self
            .exclude
            .as_ref()
            .is_some_and(|p| p.matches_with(subject, self.options))
        {
            return false;
        }
        if !node.is_dir()
            && self
                .include
                .as_ref()
                .is_some_and(|p| !p.matches_with(subject, self.options))
        {
            return false;
        }

        true
    }
}

fn compile(pattern: Option<&str>) -> Result<Option<Pattern>> {
    pattern
        .filter(|p| !p.is_empty())
        .map(|p| {
            Pattern::new(p).map_err(|source| TreeError::InvalidPattern {
                pattern: p.to_string(),
                source,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Tree {
        let mut tree = Tree::new("bucket");
        let logs = tree.add_dir(Tree::ROOT, "logs");
        tree.add_leaf(logs, "secret.log", 1, None);
        tree.add_leaf(logs, "app.log", 1, None);
        tree.add_leaf(logs, "App.LOG", 1, None);
        tree.add_leaf(Tree::ROOT, "notes.txt", 1, None);
        tree.add_dir(Tree::ROOT, ".cache");
        tree
    }

    fn check(config: &TreeConfig, segments: &[&str]) -> bool {
        let tree = tree();
        let id = tree.find(segments).unwrap();
        let filter = Filter::new(config).unwrap();
        filter.includes(&tree, id, &segments.join("/"), segments.len())
    }

    fn with_patterns(include: Option<&str>, exclude: Option<&str>) -> TreeConfig {
        TreeConfig {
            include_pattern: include.map(str::to_string),
            exclude_pattern: exclude.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_hidden_needs_all_files() {
        assert!(!check(&TreeConfig::default(), &[".cache"]));
        let config = TreeConfig {
            all_files: true,
            ..Default::default()
        };
        assert!(check(&config, &[".cache"]));
    }

    #[test]
    fn test_dirs_only_drops_leaves() {
        let config = TreeConfig {
            dirs_only: true,
            ..Default::default()
        };
        assert!(check(&config, &["logs"]));
        assert!(!check(&config, &["notes.txt"]));
    }

    #[test]
    fn test_depth_limit() {
        let config = TreeConfig {
            depth_limit: 1,
            ..Default::default()
        };
        assert!(check(&config, &["logs"]));
        assert!(!check(&config, &["logs", "app.log"]));
    }

    #[test]
    fn test_exclude_beats_include() {
        let config = with_patterns(Some("*.log"), Some("*secret*"));
        assert!(!check(&config, &["logs", "secret.log"]));
        assert!(check(&config, &["logs", "app.log"]));
        assert!(!check(&config, &["notes.txt"]));
    }

    #[test]
    fn test_include_does_not_prune_directories() {
        let config = with_patterns(Some("*.log"), None);
        assert!(check(&config, &["logs"]));
    }

    #[test]
    fn test_exclude_prunes_directories() {
        let config = with_patterns(None, Some("log?"));
        assert!(!check(&config, &["logs"]));
    }

    #[test]
    fn test_ignore_case() {
        let config = with_patterns(Some("*.log"), None);
        assert!(!check(&config, &["logs", "App.LOG"]));
        let config = TreeConfig {
            ignore_case: true,
            ..config
        };
        assert!(check(&config, &["logs", "App.LOG"]));
    }

    #[test]
    fn test_full_path_matching() {
        let config = TreeConfig {
            full_path: true,
            ..with_patterns(None, Some("logs/app*"))
        };
        assert!(!check(&config, &["logs", "app.log"]));
        assert!(check(&config, &["logs", "secret.log"]));
    }

    #[test]
    fn test_glob_syntax() {
        let cases = [
            ("test?.rs", "test1.rs", true),
            ("test?.rs", "test12.rs", false),
            ("[abc].txt", "b.txt", true),
            ("[abc].txt", "d.txt", false),
            ("[a-z].txt", "x.txt", true),
            ("[a-z].txt", "X.txt", false),
        ];
        for (pattern, name, expected) in cases {
            let mut tree = Tree::new("b");
            let id = tree.add_leaf(Tree::ROOT, name, 0, None);
            let filter = Filter::new(&with_patterns(Some(pattern), None)).unwrap();
            assert_eq!(
                filter.includes(&tree, id, name, 1),
                expected,
                "{} vs {}",
                pattern,
                name
            );
        }
    }

    #[test]
    fn test_invalid_pattern_is_fatal() {
        let err = Filter::new(&with_patterns(None, Some("[unclosed"))).unwrap_err();
        assert!(matches!(err, TreeError::InvalidPattern { pattern, .. } if pattern == "[unclosed"));
    }

    #[test]
    fn test_empty_pattern_ignored() {
        assert!(check(&with_patterns(Some(""), None), &["notes.txt"]));
    }
}
