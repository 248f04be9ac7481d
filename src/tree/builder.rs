//! Building a tree from a flat listing of object keys

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::Deserialize;

use crate::error::TreeError;

use super::key::{KeyParser, ParsedKey};
use super::node::{NodeId, NodeKind, Tree};

/// One object from a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectRecord {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Size", default)]
    pub size: u64,
    #[serde(rename = "LastModified", default)]
    pub last_modified: Option<DateTime<Utc>>,
}

impl ObjectRecord {
    pub fn new(key: impl Into<String>, size: u64, last_modified: Option<DateTime<Utc>>) -> Self {
        Self {
            key: key.into(),
            size,
            last_modified,
        }
    }
}

impl Tree {
    /// Insert a parsed key, creating missing directories on the way.
    ///
    /// Directories win over leaves: a leaf standing where a directory is
    /// needed becomes that directory, and a leaf named like an existing
    /// directory is dropped. Either case is returned as a
    /// `StructuralConflict` so the caller can report it. A repeated leaf key
    /// keeps the record with the latest timestamp, ties going to the size.
    pub fn insert(
        &mut self,
        key: &ParsedKey,
        size: u64,
        modified: Option<DateTime<Utc>>,
    ) -> Option<TreeError> {
        let (dirs, leaf) = if key.dir_marker {
            (key.segments.as_slice(), None)
        } else {
            match key.segments.split_last() {
                Some((last, dirs)) => (dirs, Some(last)),
                None => return None,
            }
        };

        let mut conflict = None;
        let mut current = Tree::ROOT;
        for name in dirs {
            let (id, superseded) = self.ensure_dir(current, name);
            if superseded {
                conflict = Some(self.conflict(id));
            }
            current = id;
        }

        match leaf {
            Some(name) => match self.node(current).children.get(name.as_str()).copied() {
                Some(existing) if self.node(existing).is_dir() => {
                    conflict = Some(self.conflict(existing));
                }
                Some(existing) => {
                    // Same key twice: the newer record wins, then the larger one.
                    let node = self.node_mut(existing);
                    if (modified, Some(size)) > (node.modified, node.size) {
                        node.size = Some(size);
                        node.modified = modified;
                    }
                }
                None => {
                    self.add_leaf(current, name, size, modified);
                }
            },
            None => {
                if modified.is_some() {
                    self.node_mut(current).modified = modified;
                }
            }
        }

        conflict
    }

    /// Find or create the directory `name` under `parent`. The flag reports
    /// whether a leaf had to be turned into the directory.
    fn ensure_dir(&mut self, parent: NodeId, name: &str) -> (NodeId, bool) {
        match self.node(parent).children.get(name).copied() {
            Some(id) if self.node(id).is_dir() => (id, false),
            Some(id) => {
                let node = self.node_mut(id);
                node.kind = NodeKind::Directory;
                node.size = None;
                node.modified = None;
                (id, true)
            }
            None => (self.add_dir(parent, name), false),
        }
    }

    fn conflict(&self, id: NodeId) -> TreeError {
        TreeError::StructuralConflict {
            path: self.path_of(id),
        }
    }
}

/// Outcome of building a tree from a listing.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Records that reached the tree
    pub inserted: usize,
    /// Skipped keys and resolved conflicts
    pub diagnostics: Vec<TreeError>,
}

impl BuildReport {
    pub fn skipped(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, TreeError::MalformedKey { .. }))
            .count()
    }

    pub fn conflicts(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, TreeError::StructuralConflict { .. }))
            .count()
    }
}

/// Builds a `Tree` from a batch of listing records.
pub struct TreeBuilder {
    parser: KeyParser,
}

impl TreeBuilder {
    pub fn new(parser: KeyParser) -> Self {
        Self { parser }
    }

    pub fn build<I>(&self, records: I) -> (Tree, BuildReport)
    where
        I: IntoIterator<Item = ObjectRecord>,
    {
        let mut tree = Tree::new(self.parser.root_label());
        let mut report = BuildReport::default();

        for record in records {
            let parsed = match self.parser.parse(&record.key) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("skipping record: {}", e);
                    report.diagnostics.push(e);
                    continue;
                }
            };
            if let Some(conflict) = tree.insert(&parsed, record.size, record.last_modified) {
                warn!("{}", conflict);
                report.diagnostics.push(conflict);
            }
            report.inserted += 1;
        }

        debug!(
            "built tree '{}': {} nodes from {} records ({} skipped, {} conflicts)",
            self.parser.root_label(),
            tree.len(),
            report.inserted,
            report.skipped(),
            report.conflicts()
        );

        (tree, report)
    }
}
