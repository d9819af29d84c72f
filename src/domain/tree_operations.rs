//! Tree traversal and mutation helpers for the embedder side.
//!
//! The engine never mutates the tree it is given. These helpers are what an
//! embedder uses to merge async loads and replace data before handing a new
//! snapshot back.

use std::collections::HashSet;
use crate::domain::visibility::{self, UnfilteredStrategy};
use crate::node::{NodeId, TreeNode};

/// Finds a node by id anywhere in the tree.
pub fn find_node<'a>(roots: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    visibility::traverse_visible(roots, &UnfilteredStrategy)
        .map(|visible| visible.node)
        .find(|node| node.id == id)
}

/// Finds a node by id and returns a mutable reference to it.
pub fn find_node_mut<'a>(roots: &'a mut [TreeNode], id: &str) -> Option<&'a mut TreeNode> {
    let mut stack: Vec<&'a mut TreeNode> = roots.iter_mut().rev().collect();
    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        if let Some(children) = node.children.as_mut() {
            stack.extend(children.iter_mut().rev());
        }
    }
    None
}

/// Replaces the children of `node_id` with a completed load and marks it loaded.
///
/// # Returns
/// `true` if the node was found.
pub fn merge_children(roots: &mut [TreeNode], node_id: &str, children: Vec<TreeNode>) -> bool {
    match find_node_mut(roots, node_id) {
        Some(node) => {
            node.children = Some(children);
            node.is_loaded = Some(true);
            true
        }
        None => false,
    }
}

/// Collects every id in the tree.
pub fn collect_ids(roots: &[TreeNode]) -> HashSet<NodeId> {
    visibility::traverse_visible(roots, &UnfilteredStrategy)
        .map(|visible| visible.node.id.clone())
        .collect()
}

/// Counts every loaded node in the tree.
pub fn count_nodes(roots: &[TreeNode]) -> usize {
    visibility::traverse_visible(roots, &UnfilteredStrategy).count()
}

/// Returns the deepest zero-based level present in the tree (0 when empty).
pub fn max_depth(roots: &[TreeNode]) -> usize {
    visibility::traverse_visible(roots, &UnfilteredStrategy)
        .map(|visible| visible.depth)
        .max()
        .unwrap_or(0)
}
