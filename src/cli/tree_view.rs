//! Tree display for hierarchies (termtree)

use termtree::Tree;

use crate::domain::{HierarchyNode, MAX_DEPTH};

/// Conversion into a printable `termtree::Tree`.
pub trait TreeNodeConvert {
    fn to_tree_string(&self, show_values: bool) -> Tree<String>;
}

impl TreeNodeConvert for HierarchyNode {
    fn to_tree_string(&self, show_values: bool) -> Tree<String> {
        build(self, 0, show_values)
    }
}

fn label(node: &HierarchyNode, show_values: bool) -> String {
    if show_values {
        format!("{} ({})", node.name, node.value)
    } else {
        node.name.clone()
    }
}

fn build(node: &HierarchyNode, depth: usize, show_values: bool) -> Tree<String> {
    let mut text = label(node, show_values);
    if depth >= MAX_DEPTH && !node.is_leaf() {
        // children past the cutoff are not exported
        text.push_str(&format!(" [+{} not exported]", node.children.len()));
        return Tree::new(text);
    }
    let leaves: Vec<_> = node
        .children
        .iter()
        .map(|c| build(c, depth + 1, show_values))
        .collect();
    Tree::new(text).with_leaves(leaves)
}
