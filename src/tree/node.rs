//! Arena-backed directory tree

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// Index of a node inside its `Tree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    Leaf,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    /// Object size, leaves only
    pub size: Option<u64>,
    pub modified: Option<DateTime<Utc>>,
    /// Children by name, in order of first creation
    pub children: IndexMap<String, NodeId>,
    pub parent: Option<NodeId>,
}

impl Node {
    fn directory(name: &str, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::Directory,
            size: None,
            modified: None,
            children: IndexMap::new(),
            parent,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

/// Directory tree owning every node; the root always exists.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub const ROOT: NodeId = NodeId(0);

    pub fn new(root_name: &str) -> Self {
        Self {
            nodes: vec![Node::directory(root_name, None)],
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn root(&self) -> &Node {
        self.node(Self::ROOT)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root().children.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Child ids of a directory in creation order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).children.values().copied().collect()
    }

    pub(crate) fn add_child(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes[parent.0].children.insert(node.name.clone(), id);
        self.nodes.push(node);
        id
    }

    pub(crate) fn add_dir(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.add_child(parent, Node::directory(name, Some(parent)))
    }

    pub(crate) fn add_leaf(
        &mut self,
        parent: NodeId,
        name: &str,
        size: u64,
        modified: Option<DateTime<Utc>>,
    ) -> NodeId {
        let node = Node {
            name: name.to_string(),
            kind: NodeKind::Leaf,
            size: Some(size),
            modified,
            children: IndexMap::new(),
            parent: Some(parent),
        };
        self.add_child(parent, node)
    }

    /// Path from the root, names joined with `/`.
    ///
    /// A trailing `/` on the root label (a prefix such as `logs/`) is not
    /// doubled.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            let node = self.node(cur);
            names.push(node.name.trim_end_matches('/'));
            current = node.parent;
        }
        names.reverse();
        names.join("/")
    }

    /// Sum of all leaf sizes below (and including) `id`.
    pub fn total_size(&self, id: NodeId) -> u64 {
        let node = self.node(id);
        match node.kind {
            NodeKind::Leaf => node.size.unwrap_or(0),
            NodeKind::Directory => node.children.values().map(|&c| self.total_size(c)).sum(),
        }
    }

    /// Look up a node by its segments below the root.
    pub fn find(&self, segments: &[&str]) -> Option<NodeId> {
        segments.iter().try_fold(Self::ROOT, |id, name| {
            self.node(id).children.get(*name).copied()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tree_has_root() {
        let tree = Tree::new("bucket");
        assert_eq!(tree.len(), 1);
        assert!(tree.is_empty());
        assert!(tree.root().is_dir());
        assert_eq!(tree.path_of(Tree::ROOT), "bucket");
    }

    #[test]
    fn test_path_and_size() {
        let mut tree = Tree::new("logs/");
        let dir = tree.add_dir(Tree::ROOT, "2024");
        let a = tree.add_leaf(dir, "a.log", 10, None);
        tree.add_leaf(dir, "b.log", 32, None);
        tree.add_leaf(Tree::ROOT, "top.log", 1, None);

        assert_eq!(tree.path_of(a), "logs/2024/a.log");
        assert_eq!(tree.total_size(dir), 42);
        assert_eq!(tree.total_size(Tree::ROOT), 43);
        assert_eq!(tree.find(&["2024", "a.log"]), Some(a));
        assert_eq!(tree.find(&["2024", "missing"]), None);
    }

    #[test]
    fn test_children_keep_creation_order() {
        let mut tree = Tree::new("b");
        let z = tree.add_leaf(Tree::ROOT, "z", 0, None);
        let a = tree.add_dir(Tree::ROOT, "a");
        assert_eq!(tree.children(Tree::ROOT), vec![z, a]);
        assert_eq!(tree.node(a).parent, Some(Tree::ROOT));
    }
}
