//! Traversal helpers shared by the output formats

use crate::tree::{Filter, NodeId, Tree, TreeConfig, order};

/// A child that survived filtering, with its path relative to the root.
#[derive(Debug, Clone)]
pub struct VisibleChild {
    pub id: NodeId,
    pub path: String,
    pub is_last: bool,
}

/// Filter then order the children of `dir`, which sits at `depth` and has
/// the root-relative path `dir_path` (empty for the root).
pub fn visible_children(
    tree: &Tree,
    dir: NodeId,
    dir_path: &str,
    depth: usize,
    filter: &Filter,
    config: &TreeConfig,
) -> Vec<VisibleChild> {
    let included: Vec<NodeId> = tree
        .node(dir)
        .children
        .iter()
        .filter(|&(name, &id)| filter.includes(tree, id, &join_path(dir_path, name), depth + 1))
        .map(|(_, &id)| id)
        .collect();

    let ordered = order(tree, &included, config);
    let count = ordered.len();
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, id)| VisibleChild {
            id,
            path: join_path(dir_path, &tree.node(id).name),
            is_last: i + 1 == count,
        })
        .collect()
}

pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Prefix for the children of an entry, extending its own prefix.
pub fn continuation_prefix(prefix: &str, is_last: bool) -> String {
    if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuation_prefix() {
        assert_eq!(continuation_prefix("", true), "    ");
        assert_eq!(continuation_prefix("", false), "│   ");
        assert_eq!(continuation_prefix("│   ", true), "│       ");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "a"), "a");
        assert_eq!(join_path("a/b", "c"), "a/b/c");
    }

    #[test]
    fn test_visible_children_marks_last() {
        let mut tree = Tree::new("b");
        tree.add_leaf(Tree::ROOT, "z", 0, None);
        tree.add_leaf(Tree::ROOT, ".hidden", 0, None);
        let dir = tree.add_dir(Tree::ROOT, "a");
        tree.add_leaf(dir, "inner", 0, None);

        let config = TreeConfig::default();
        let filter = Filter::new(&config).unwrap();
        let children = visible_children(&tree, Tree::ROOT, "", 0, &filter, &config);

        let names: Vec<_> = children.iter().map(|c| tree.node(c.id).name.as_str()).collect();
        assert_eq!(names, vec!["a", "z"]);
        assert!(!children[0].is_last);
        assert!(children[1].is_last);

        let nested = visible_children(&tree, dir, "a", 1, &filter, &config);
        assert_eq!(nested[0].path, "a/inner");
    }
}
