//! JSON output formatting

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::tree::{Filter, NodeId, Tree, TreeConfig};

use super::tree::Counts;
use super::utils::visible_children;

/// One element of the JSON document, shaped like `tree -J` output.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JsonEntry {
    Directory {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        time: Option<DateTime<Utc>>,
        contents: Vec<JsonEntry>,
    },
    File {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        time: Option<DateTime<Utc>>,
    },
    Report {
        directories: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        files: Option<usize>,
    },
}

/// Build the `[root, report]` document for the visible tree.
pub fn json_entries(tree: &Tree, config: &TreeConfig, filter: &Filter) -> (Vec<JsonEntry>, Counts) {
    let mut counts = Counts::default();
    let root = build_entry(tree, Tree::ROOT, "", 0, config, filter, &mut counts);
    let report = JsonEntry::Report {
        directories: counts.dirs,
        files: (!config.dirs_only).then_some(counts.files),
    };
    (vec![root, report], counts)
}

/// Write the visible tree as pretty-printed JSON.
pub fn write_json<W: Write>(
    tree: &Tree,
    config: &TreeConfig,
    filter: &Filter,
    out: &mut W,
) -> Result<Counts> {
    let (entries, counts) = json_entries(tree, config, filter);
    serde_json::to_writer_pretty(&mut *out, &entries).map_err(io::Error::other)?;
    writeln!(out)?;
    Ok(counts)
}

fn build_entry(
    tree: &Tree,
    id: NodeId,
    path: &str,
    depth: usize,
    config: &TreeConfig,
    filter: &Filter,
    counts: &mut Counts,
) -> JsonEntry {
    let node = tree.node(id);
    let name = if config.full_path && !path.is_empty() {
        tree.path_of(id)
    } else {
        node.name.clone()
    };
    let time = if config.show_mod_time { node.modified } else { None };
    let with_size = config.byte_size || config.human_size;

    if !node.is_dir() {
        return JsonEntry::File {
            name,
            size: if with_size { node.size } else { None },
            time,
        };
    }

    let contents = visible_children(tree, id, path, depth, filter, config)
        .into_iter()
        .map(|child| {
            if tree.node(child.id).is_dir() {
                counts.dirs += 1;
            } else {
                counts.files += 1;
            }
            build_entry(tree, child.id, &child.path, depth + 1, config, filter, counts)
        })
        .collect();

    JsonEntry::Directory {
        name,
        size: (with_size && config.dir_sizes).then(|| tree.total_size(id)),
        time,
        contents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_records;
    use crate::tree::{KeyParser, TreeBuilder};

    fn render(config: &TreeConfig) -> serde_json::Value {
        let tree = TreeBuilder::new(KeyParser::new("bucket", None))
            .build(sample_records())
            .0;
        let filter = Filter::new(config).unwrap();
        let mut out = Vec::new();
        write_json(&tree, config, &filter, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_json_structure() {
        let json = render(&TreeConfig::default());
        assert_eq!(json[0]["type"], "directory");
        assert_eq!(json[0]["name"], "bucket");
        assert_eq!(json[0]["contents"][0]["name"], "docs");
        assert_eq!(json[0]["contents"][0]["contents"][0]["name"], "api.md");
        assert_eq!(json[0]["contents"][2]["type"], "file");
        assert!(json[0]["contents"][2].get("size").is_none());
        assert_eq!(json[1]["type"], "report");
        assert_eq!(json[1]["directories"], 3);
        assert_eq!(json[1]["files"], 5);
    }

    #[test]
    fn test_json_sizes_and_times() {
        let config = TreeConfig {
            byte_size: true,
            show_mod_time: true,
            ..Default::default()
        };
        let json = render(&config);
        let readme = &json[0]["contents"][2];
        assert_eq!(readme["size"], 120);
        assert_eq!(readme["time"], "2024-01-02T15:09:05Z");
    }

    #[test]
    fn test_json_dirs_only_report() {
        let config = TreeConfig {
            dirs_only: true,
            ..Default::default()
        };
        let json = render(&config);
        assert_eq!(json[1]["directories"], 3);
        assert!(json[1].get("files").is_none());
    }
}
