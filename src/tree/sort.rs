//! Sibling ordering

use std::cmp::Ordering;

use super::config::{SortBy, TreeConfig};
use super::node::{NodeId, Tree};

/// Order the children of one directory.
///
/// `no_sort` keeps creation order and ignores `dirs_first` and `reverse_sort`.
/// Otherwise directories are grouped first when asked, the comparator runs
/// within each group, and `reverse_sort` flips the whole grouped sequence.
pub fn order(tree: &Tree, children: &[NodeId], config: &TreeConfig) -> Vec<NodeId> {
    if config.no_sort {
        return children.to_vec();
    }

    let mut keyed: Vec<(NodeId, u64)> = children
        .iter()
        .map(|&id| (id, sort_size(tree, id, config)))
        .collect();

    keyed.sort_by(|&(a, size_a), &(b, size_b)| {
        let (na, nb) = (tree.node(a), tree.node(b));
        let group = if config.dirs_first {
            nb.is_dir().cmp(&na.is_dir())
        } else {
            Ordering::Equal
        };
        let by = match config.sort_by {
            SortBy::Name => Ordering::Equal,
            SortBy::Size => size_a.cmp(&size_b),
            SortBy::Version => version_cmp(&na.name, &nb.name),
            SortBy::Time => na.modified.cmp(&nb.modified),
        };
        group.then(by).then_with(|| na.name.cmp(&nb.name))
    });

    let mut ordered: Vec<NodeId> = keyed.into_iter().map(|(id, _)| id).collect();
    if config.reverse_sort {
        ordered.reverse();
    }
    ordered
}

fn sort_size(tree: &Tree, id: NodeId, config: &TreeConfig) -> u64 {
    if config.sort_by != SortBy::Size {
        return 0;
    }
    let node = tree.node(id);
    if node.is_dir() {
        if config.dir_sizes { tree.total_size(id) } else { 0 }
    } else {
        node.size.unwrap_or(0)
    }
}

/// Natural ordering: runs of ASCII digits compare by numeric value,
/// everything else by character.
pub fn version_cmp(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let (run_a, next_i) = digit_run(a, i);
            let (run_b, next_j) = digit_run(b, j);
            let ord = numeric_cmp(run_a, run_b);
            if ord != Ordering::Equal {
                return ord;
            }
            i = next_i;
            j = next_j;
        } else {
            let ord = a[i].cmp(&b[j]);
            if ord != Ordering::Equal {
                return ord;
            }
            i += 1;
            j += 1;
        }
    }

    (a.len() - i).cmp(&(b.len() - j))
}

fn digit_run(s: &[u8], start: usize) -> (&[u8], usize) {
    let end = s[start..]
        .iter()
        .position(|c| !c.is_ascii_digit())
        .map_or(s.len(), |n| start + n);
    (&s[start..end], end)
}

/// Compare digit strings by value without parsing, so long runs cannot overflow.
fn numeric_cmp(a: &[u8], b: &[u8]) -> Ordering {
    let trim = |s: &[u8]| -> usize { s.iter().take_while(|&&c| c == b'0').count() };
    let (a, b) = (&a[trim(a)..], &b[trim(b)..]);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
