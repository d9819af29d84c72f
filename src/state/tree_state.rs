//! Tree expansion state management.
//!
//! This module encapsulates which nodes are expanded. Expansion has no
//! cascade: collapsing a parent keeps its descendants' entries, they simply
//! become invisible until the parent is expanded again.

use std::collections::HashSet;
use crate::cache::NodeIndex;
use crate::node::NodeId;

/// State related to tree node expansion.
///
/// Responsibilities:
/// - Tracking which tree nodes are expanded
/// - Managing bulk expansion operations
/// - Pruning ids that no longer exist after a data replacement
#[derive(Debug, Clone, Default)]
pub struct TreeState {
    /// Set of expanded node IDs
    expanded_nodes: HashSet<NodeId>,
}

impl TreeState {
    /// Creates a new tree state with no expanded nodes.
    pub fn new() -> Self {
        Self {
            expanded_nodes: HashSet::new(),
        }
    }

    /// Creates a tree state with the given ids expanded.
    pub fn with_expanded<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        Self {
            expanded_nodes: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Clears all expansion state (collapses all nodes).
    pub fn clear(&mut self) {
        self.expanded_nodes.clear();
    }

    // ===== Expansion Queries =====

    /// Returns a reference to the set of expanded node IDs.
    pub fn expanded_nodes_set(&self) -> &HashSet<NodeId> {
        &self.expanded_nodes
    }

    pub fn is_expanded(&self, node_id: &str) -> bool {
        self.expanded_nodes.contains(node_id)
    }

    // ===== Expansion Mutations =====

    /// Expands the given node.
    ///
    /// # Returns
    /// `true` if the node was newly expanded, `false` if already expanded.
    pub fn expand(&mut self, node_id: &str) -> bool {
        self.expanded_nodes.insert(node_id.to_owned())
    }

    /// Collapses the given node.
    ///
    /// # Returns
    /// `true` if the node was expanded and is now collapsed, `false` if already collapsed.
    pub fn collapse(&mut self, node_id: &str) -> bool {
        self.expanded_nodes.remove(node_id)
    }

    /// Flips the node's expansion.
    ///
    /// # Returns
    /// `true` if the node is expanded afterwards.
    pub fn toggle(&mut self, node_id: &str) -> bool {
        if self.collapse(node_id) {
            false
        } else {
            self.expand(node_id)
        }
    }

    /// Replaces the set with every expandable id in the index.
    ///
    /// Leaves are never added.
    pub fn expand_all(&mut self, index: &NodeIndex) {
        self.expanded_nodes = index.expandable_ids().map(str::to_owned).collect();
    }

    /// Drops ids for which `keep` returns false.
    ///
    /// # Returns
    /// Number of ids removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        let before = self.expanded_nodes.len();
        self.expanded_nodes.retain(|id| keep(id));
        before - self.expanded_nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::TreeNode;

    #[test]
    fn test_toggle_round_trip() {
        let mut state = TreeState::new();
        assert!(state.toggle("a"));
        assert!(state.is_expanded("a"));
        assert!(!state.toggle("a"));
        assert!(!state.is_expanded("a"));
    }

    #[test]
    fn test_expand_all_skips_leaves() {
        let index = NodeIndex::build(&[
            TreeNode::new("1", "P").with_children(vec![TreeNode::new("1-1", "C")]),
            TreeNode::new("2", "Empty").with_children(vec![]),
            TreeNode::new("3", "Async").with_has_children(true),
        ]);
        let mut state = TreeState::new();
        state.expand_all(&index);
        let mut ids: Vec<&str> = state.expanded_nodes_set().iter().map(String::as_str).collect();
        ids.sort();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_collapse_preserves_descendants() {
        let mut state = TreeState::with_expanded(["1", "1-1"]);
        state.collapse("1");
        assert!(state.is_expanded("1-1"));
    }

    #[test]
    fn test_retain_reports_removed() {
        let mut state = TreeState::with_expanded(["a", "b", "c"]);
        let removed = state.retain(|id| id != "b");
        assert_eq!(removed, 1);
        assert!(!state.is_expanded("b"));
    }
}
