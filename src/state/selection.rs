//! Ground-truth selection state.
//!
//! Holds only the ids the user explicitly toggled. Visual selection of
//! parents whose children are all selected is derived at flatten time and is
//! never stored here.

use std::collections::HashSet;
use crate::cache::NodeIndex;
use crate::domain::selection;
use crate::node::NodeId;

/// State related to user selection.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    /// Explicitly selected node IDs
    selected_ids: HashSet<NodeId>,
}

impl SelectionState {
    /// Creates a new selection state with nothing selected.
    pub fn new() -> Self {
        Self {
            selected_ids: HashSet::new(),
        }
    }

    /// Creates a selection state seeded with `ids`.
    pub fn with_selected<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        Self {
            selected_ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Clears all selection state.
    pub fn clear(&mut self) {
        self.selected_ids.clear();
    }

    // ===== Selection Queries =====

    /// Returns the ground-truth selection set.
    pub fn selected_ids(&self) -> &HashSet<NodeId> {
        &self.selected_ids
    }

    pub fn is_selected(&self, node_id: &str) -> bool {
        self.selected_ids.contains(node_id)
    }

    pub fn len(&self) -> usize {
        self.selected_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }

    // ===== Selection Mutations =====

    /// Toggles `node_id`, optionally cascading through the index.
    ///
    /// The new set is computed from a snapshot and swapped in whole.
    pub fn toggle(&mut self, index: &NodeIndex, node_id: &str, cascade: bool) {
        self.selected_ids = selection::toggle_selection(&self.selected_ids, index, node_id, cascade);
    }
}
