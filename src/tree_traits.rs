/*
Printable views of element trees.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::{Children, ElementNode, Text};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

/// Label used for one element: `type#id`, followed by its text when present.
fn label(node: &ElementNode) -> String {
    if node.text().is_empty() {
        node.to_string()
    } else {
        format!("{} {:?}", node, node.text())
    }
}

impl TreeNodeConvert for ElementNode {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        // Children in display order
        let leaves: Vec<_> = self
            .children_by_order()
            .into_iter()
            .map(|c| c.to_tree_string())
            .collect();

        Tree::new(label(self)).with_leaves(leaves)
    }
}
