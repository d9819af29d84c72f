//! Tree flattener and selection engine.
//!
//! The engine owns the current tree snapshot together with everything derived
//! from it or mutated against it:
//! - The node index (rebuilt on every snapshot replacement)
//! - Expansion and ground-truth selection sets
//! - The optional background child loader and its loading flags
//!
//! All mutation goes through the methods here; rows are always derived fresh.

use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;
use crate::cache::NodeIndex;
use crate::config::ComboboxConfig;
use crate::domain::flatten;
use crate::io::{AsyncChildLoader, LoadResult};
use crate::node::{FlatTreeNode, NodeId, TreeNode};
use crate::state::{SelectionState, TreeState};

/// Owns tree, index, expansion, selection, and loading state.
#[derive(Default)]
pub struct TreeEngine {
    /// Current tree snapshot (possibly filtered)
    tree: Vec<TreeNode>,
    /// Derived id index of `tree`
    index: NodeIndex,
    tree_state: TreeState,
    selection: SelectionState,
    /// Background child loader, if the embedder supplied one
    loader: Option<AsyncChildLoader>,
}

impl TreeEngine {
    /// Creates an empty engine with no loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine seeded with the config's default expansion and selection.
    pub fn with_config(config: &ComboboxConfig) -> Self {
        Self {
            tree_state: TreeState::with_expanded(config.default_expanded_ids.iter().cloned()),
            selection: SelectionState::with_selected(config.default_selected_ids.iter().cloned()),
            ..Self::default()
        }
    }

    /// Installs the background child loader.
    pub fn set_loader(&mut self, loader: AsyncChildLoader) {
        self.loader = Some(loader);
    }

    /// Replaces the tree snapshot and rebuilds the index.
    ///
    /// Expansion and selection are kept as-is; see [`prune_expansion`](Self::prune_expansion).
    pub fn set_tree(&mut self, tree: Vec<TreeNode>) {
        self.tree = tree;
        self.index.rebuild(&self.tree);
        debug!(
            nodes = self.index.len(),
            generation = self.index.generation(),
            "tree snapshot replaced"
        );
    }

    // ===== Queries =====

    pub fn tree(&self) -> &[TreeNode] {
        &self.tree
    }

    pub fn index(&self) -> &NodeIndex {
        &self.index
    }

    pub fn expanded_ids(&self) -> &HashSet<NodeId> {
        self.tree_state.expanded_nodes_set()
    }

    pub fn selected_ids(&self) -> &HashSet<NodeId> {
        self.selection.selected_ids()
    }

    pub fn is_expanded(&self, node_id: &str) -> bool {
        self.tree_state.is_expanded(node_id)
    }

    pub fn is_selected(&self, node_id: &str) -> bool {
        self.selection.is_selected(node_id)
    }

    /// Derives the render-ready row list from the current state.
    pub fn flat_list(&self) -> Vec<FlatTreeNode> {
        flatten::compute_flat_list(
            &self.tree,
            self.tree_state.expanded_nodes_set(),
            self.selection.selected_ids(),
        )
    }

    // ===== Expansion =====

    /// Flips a node's expansion.
    ///
    /// Expanding an expandable node without loaded children starts a
    /// background load when a loader is installed. A request for a node that
    /// is already loading is ignored by the loader; expansion still flips.
    ///
    /// # Returns
    /// `true` if the node is expanded afterwards.
    pub fn toggle_expansion(&mut self, node_id: &str) -> bool {
        let expanded = self.tree_state.toggle(node_id);
        debug!(node_id, expanded, "expansion toggled");
        if expanded {
            self.maybe_start_load(node_id);
        }
        expanded
    }

    /// Expands a node (starting a load if needed).
    pub fn expand(&mut self, node_id: &str) {
        if self.tree_state.expand(node_id) {
            self.maybe_start_load(node_id);
        }
    }

    pub fn collapse(&mut self, node_id: &str) {
        self.tree_state.collapse(node_id);
    }

    /// Expands every expandable node of the current snapshot.
    ///
    /// Unloaded nodes are expanded without triggering loads.
    pub fn expand_all(&mut self) {
        self.tree_state.expand_all(&self.index);
        debug!(expanded = self.tree_state.expanded_nodes_set().len(), "expanded all");
    }

    pub fn collapse_all(&mut self) {
        self.tree_state.clear();
        debug!("collapsed all");
    }

    /// Drops expansion entries whose id is absent from `valid`.
    ///
    /// `valid` indexes the unfiltered data, so ids hidden by a search survive.
    ///
    /// # Returns
    /// Number of entries removed.
    pub fn prune_expansion(&mut self, valid: &NodeIndex) -> usize {
        let removed = self.tree_state.retain(|id| valid.contains(id));
        if removed > 0 {
            debug!(removed, "pruned stale expansion ids");
        }
        removed
    }

    fn maybe_start_load(&self, node_id: &str) {
        let Some(loader) = &self.loader else {
            return;
        };
        let needs_children = self.index.get(node_id).is_some_and(|entry| entry.needs_children);
        if needs_children {
            loader.start(node_id);
        }
    }

    // ===== Selection =====

    /// Toggles a node's selection, with or without cascade.
    pub fn toggle_selection(&mut self, node_id: &str, cascade: bool) {
        self.selection.toggle(&self.index, node_id, cascade);
    }

    /// Clears the ground-truth selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ===== Loading =====

    pub fn is_loading(&self, node_id: &str) -> bool {
        self.loader.as_ref().is_some_and(|loader| loader.is_loading(node_id))
    }

    /// In-flight node ids, sorted.
    pub fn loading_ids(&self) -> Vec<NodeId> {
        self.loader
            .as_ref()
            .map(AsyncChildLoader::loading_ids)
            .unwrap_or_default()
    }

    /// Collects completed loads (non-blocking).
    ///
    /// The engine does not merge the results; the embedder does and then
    /// supplies the new snapshot.
    pub fn poll_loads(&self) -> Vec<LoadResult> {
        self.loader.as_ref().map(AsyncChildLoader::poll).unwrap_or_default()
    }

    /// Blocks up to `timeout` for the next completed load.
    pub fn wait_for_load(&self, timeout: Duration) -> Option<LoadResult> {
        self.loader.as_ref()?.wait_for(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TreeNode> {
        vec![
            TreeNode::new("1", "Parent 1").with_children(vec![
                TreeNode::new("1-1", "Child 1-1"),
                TreeNode::new("1-2", "Child 1-2"),
            ]),
            TreeNode::new("2", "Parent 2").with_children(vec![]),
        ]
    }

    fn ids(rows: &[FlatTreeNode]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    fn sorted(set: &HashSet<NodeId>) -> Vec<&str> {
        let mut v: Vec<&str> = set.iter().map(String::as_str).collect();
        v.sort();
        v
    }

    #[test]
    fn test_expand_flattens_children() {
        let mut engine = TreeEngine::new();
        engine.set_tree(sample());
        assert_eq!(ids(&engine.flat_list()), vec!["1", "2"]);

        assert!(engine.toggle_expansion("1"));
        let rows = engine.flat_list();
        assert_eq!(ids(&rows), vec!["1", "1-1", "1-2", "2"]);
        let levels: Vec<usize> = rows.iter().map(|r| r.level).collect();
        assert_eq!(levels, vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_cascade_select_then_deselect_child() {
        let mut engine = TreeEngine::new();
        engine.set_tree(sample());

        engine.toggle_selection("1", true);
        assert_eq!(sorted(engine.selected_ids()), vec!["1", "1-1", "1-2"]);

        engine.toggle_selection("1-1", true);
        assert_eq!(sorted(engine.selected_ids()), vec!["1-2"]);
    }

    #[test]
    fn test_expand_all_and_collapse_all() {
        let mut engine = TreeEngine::new();
        engine.set_tree(sample());
        engine.expand_all();
        assert_eq!(sorted(engine.expanded_ids()), vec!["1"]);
        engine.collapse_all();
        assert!(engine.expanded_ids().is_empty());
    }

    #[test]
    fn test_config_seeds_state() {
        let config = ComboboxConfig {
            default_expanded_ids: vec!["1".into()],
            default_selected_ids: vec!["1-2".into()],
            ..Default::default()
        };
        let mut engine = TreeEngine::with_config(&config);
        engine.set_tree(sample());
        let rows = engine.flat_list();
        assert_eq!(rows.len(), 4);
        assert!(rows[0].is_indeterminate);
        assert!(rows[2].is_selected);
    }

    #[test]
    fn test_prune_expansion() {
        let mut engine = TreeEngine::new();
        engine.set_tree(sample());
        engine.expand("1");
        engine.expand("gone");
        assert_eq!(engine.prune_expansion(&NodeIndex::build(&sample())), 1);
        assert!(engine.is_expanded("1"));
    }

    #[test]
    fn test_async_expand_starts_load() {
        let mut engine = TreeEngine::new();
        engine.set_loader(AsyncChildLoader::from_fn(|id| {
            Ok(Some(vec![TreeNode::new(format!("{id}-a"), "Loaded")]))
        }));
        engine.set_tree(vec![TreeNode::new("r", "Remote").with_has_children(true)]);

        assert!(engine.toggle_expansion("r"));
        let result = engine.wait_for_load(Duration::from_secs(5));
        assert!(matches!(result, Some(LoadResult::Loaded { ref node_id, .. }) if node_id == "r"));
        assert!(!engine.is_loading("r"));
        assert!(engine.loading_ids().is_empty());
    }

    #[test]
    fn test_loaded_node_does_not_reload() {
        let mut engine = TreeEngine::new();
        engine.set_loader(AsyncChildLoader::from_fn(|_| Ok(None)));
        engine.set_tree(sample());
        engine.toggle_expansion("1");
        assert!(engine.wait_for_load(Duration::from_millis(50)).is_none());
    }

    #[test]
    fn test_no_loader_is_harmless() {
        let mut engine = TreeEngine::new();
        engine.set_tree(vec![TreeNode::new("r", "Remote").with_has_children(true)]);
        assert!(engine.toggle_expansion("r"));
        assert!(engine.poll_loads().is_empty());
        assert!(engine.wait_for_load(Duration::from_millis(1)).is_none());
    }
}
