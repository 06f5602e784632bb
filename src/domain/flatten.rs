//! Hierarchy flattening into fixed-depth rows.
//!
//! Depth-first, pre-order, children in given order. The root (depth 0) is never
//! emitted. A node emits a row when it is a leaf or when it sits at `MAX_DEPTH`;
//! anything below `MAX_DEPTH` is dropped.

use tracing::instrument;

use crate::domain::entities::{FlattenedTable, HierarchyNode, Row, MAX_DEPTH};

/// Flatten a hierarchy into rows, one per leaf reachable within `MAX_DEPTH`.
#[instrument(level = "debug", skip(root), fields(root = %root.name))]
pub fn flatten(root: &HierarchyNode) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut path: Vec<&str> = Vec::with_capacity(MAX_DEPTH);
    for child in &root.children {
        collect_rows(child, 1, &mut path, &mut rows);
    }
    rows
}

/// Flatten into a `FlattenedTable`.
pub fn flatten_table(root: &HierarchyNode) -> FlattenedTable {
    FlattenedTable {
        rows: flatten(root),
    }
}

fn collect_rows<'a>(
    node: &'a HierarchyNode,
    depth: usize,
    path: &mut Vec<&'a str>,
    rows: &mut Vec<Row>,
) {
    path.push(&node.name);
    if node.is_leaf() || depth >= MAX_DEPTH {
        rows.push(Row::from_path(path.as_slice()));
    } else {
        for child in &node.children {
            collect_rows(child, depth + 1, path, rows);
        }
    }
    path.pop();
}

/// Number of rows `flatten` would produce, without building them.
pub fn count_rows(root: &HierarchyNode) -> usize {
    fn count(node: &HierarchyNode, depth: usize) -> usize {
        if node.is_leaf() || depth >= MAX_DEPTH {
            1
        } else {
            node.children.iter().map(|c| count(c, depth + 1)).sum()
        }
    }
    root.children.iter().map(|c| count(c, 1)).sum()
}

/// Number of nodes below the depth cutoff, i.e. dropped from the export.
pub fn truncated_nodes(root: &HierarchyNode) -> usize {
    fn subtree_size(node: &HierarchyNode) -> usize {
        1 + node.children.iter().map(subtree_size).sum::<usize>()
    }
    fn count(node: &HierarchyNode, depth: usize) -> usize {
        if depth >= MAX_DEPTH {
            node.children.iter().map(subtree_size).sum()
        } else {
            node.children.iter().map(|c| count(c, depth + 1)).sum()
        }
    }
    root.children.iter().map(|c| count(c, 1)).sum()
}
