//! Cascading selection set algebra.
//!
//! Operates on the ground-truth selection set only. The update is computed on
//! a copy of the snapshot and returned whole, so callers swap it in atomically.

use std::collections::HashSet;
use crate::cache::NodeIndex;
use crate::node::NodeId;

/// Returns the selection set after toggling `node_id`.
///
/// Without `cascade` only the node's own membership flips. With `cascade`:
/// 1. The node's membership flips; the new membership is the cascade direction.
/// 2. Every loaded descendant is added or removed in that direction.
/// 3. Ancestors are walked to the root. On deselect each ancestor is removed.
///    On select an ancestor is added only when all of its direct children are
///    now in the set, otherwise removed. An ancestor with no loaded children is
///    never added.
///
/// Ids absent from the index flip on their own and cascade nowhere.
pub fn toggle_selection(
    selected: &HashSet<NodeId>,
    index: &NodeIndex,
    node_id: &str,
    cascade: bool,
) -> HashSet<NodeId> {
    let mut next = selected.clone();
    let select = !next.contains(node_id);

    if select {
        next.insert(node_id.to_owned());
    } else {
        next.remove(node_id);
    }

    if !cascade {
        return next;
    }

    for descendant in index.descendants(node_id) {
        if select {
            next.insert(descendant.to_owned());
        } else {
            next.remove(descendant);
        }
    }

    for ancestor in index.ancestors(node_id) {
        let children = index.children_of(ancestor);
        let all_children_selected =
            !children.is_empty() && children.iter().all(|child| next.contains(child));

        if select && all_children_selected {
            next.insert(ancestor.to_owned());
        } else {
            next.remove(ancestor);
        }
    }

    tracing::debug!(
        node_id,
        select,
        selected = next.len(),
        "cascaded selection"
    );

    next
}
