//! Domain entities: core data structures

use std::fmt;

/// Number of label columns in every exported row.
pub const MAX_DEPTH: usize = 3;

/// Column headers, one per depth level.
pub const HEADER: [&str; MAX_DEPTH] = ["Depth1", "Depth2", "Depth3"];

/// Node of a topic hierarchy.
///
/// The root is a container (conventionally "Total") whose own label is never
/// exported. Children are ordered; their order decides row order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HierarchyNode {
    /// Topic label
    pub name: String,
    /// Weight carried for display, ignored by flattening
    pub value: f64,
    /// Free-form description, ignored by flattening
    pub description: Option<String>,
    /// Ordered children, empty for leaves
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Create a leaf node.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a node with the given children.
    pub fn branch(name: impl Into<String>, children: Vec<HierarchyNode>) -> Self {
        Self {
            name: name.into(),
            children,
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Height of the subtree below this node (a leaf has depth 0).
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.depth())
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for HierarchyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One exported line: a path from a depth-1 node down to a leaf or the depth-3 cutoff.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    cells: [String; MAX_DEPTH],
}

impl Row {
    /// Build a row from a path of 1..=3 labels, padding on the right with empty cells.
    ///
    /// Labels beyond `MAX_DEPTH` are ignored.
    pub fn from_path<S: AsRef<str>>(path: &[S]) -> Self {
        let mut cells: [String; MAX_DEPTH] = Default::default();
        for (cell, label) in cells.iter_mut().zip(path) {
            *cell = label.as_ref().to_string();
        }
        Self { cells }
    }

    pub fn cells(&self) -> &[String; MAX_DEPTH] {
        &self.cells
    }

    pub fn depth1(&self) -> &str {
        &self.cells[0]
    }

    pub fn depth2(&self) -> &str {
        &self.cells[1]
    }

    pub fn depth3(&self) -> &str {
        &self.cells[2]
    }
}

/// Flattened hierarchy ready for CSV rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlattenedTable {
    pub rows: Vec<Row>,
}

impl FlattenedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
