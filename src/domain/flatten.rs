//! Tree flattening with derived selection state.
//!
//! The flat row list is a pure function of (tree, expansion set, selection
//! set). Nothing here is cached: `isSelected` and `isIndeterminate` are
//! derived from the ground-truth selection set on every call.

use std::collections::{HashMap, HashSet};
use crate::domain::visibility::{self, ExpandedStrategy};
use crate::node::{FlatTreeNode, NodeId, TreeNode};

/// Derived selection state of one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivedSelection {
    /// In the ground-truth set, or every child is effectively selected
    pub selected: bool,
    /// Not selected, but some child is selected or indeterminate
    pub indeterminate: bool,
}

/// Computes derived selection for every node of the full tree (post-order).
///
/// A childless node is never selected by the all-children rule.
pub fn derive_selection(
    roots: &[TreeNode],
    selected: &HashSet<NodeId>,
) -> HashMap<NodeId, DerivedSelection> {
    let mut derived: HashMap<NodeId, DerivedSelection> = HashMap::new();

    // (node, children_done). A node is resolved on its second pop, after all
    // of its children.
    let mut stack: Vec<(&TreeNode, bool)> = roots.iter().rev().map(|n| (n, false)).collect();

    while let Some((node, children_done)) = stack.pop() {
        let children = node.children();

        if !children_done && !children.is_empty() {
            stack.push((node, true));
            stack.extend(children.iter().rev().map(|c| (c, false)));
            continue;
        }

        let mut state = DerivedSelection {
            selected: selected.contains(&node.id),
            indeterminate: false,
        };

        if !children.is_empty() {
            let child_state = |c: &TreeNode| derived.get(&c.id).copied().unwrap_or_default();
            let all_selected = children.iter().all(|c| child_state(c).selected);
            let some_selected = children.iter().any(|c| {
                let s = child_state(c);
                s.selected || s.indeterminate
            });

            if all_selected {
                state.selected = true;
            }
            if !state.selected && some_selected {
                state.indeterminate = true;
            }
        }

        derived.insert(node.id.clone(), state);
    }

    derived
}

/// Produces the ordered, render-ready row list.
///
/// Rows follow the declared child order, depth-first, parents before
/// children, descending only into expandable nodes present in `expanded`.
pub fn compute_flat_list(
    roots: &[TreeNode],
    expanded: &HashSet<NodeId>,
    selected: &HashSet<NodeId>,
) -> Vec<FlatTreeNode> {
    let derived = derive_selection(roots, selected);
    let strategy = ExpandedStrategy { expanded };

    visibility::traverse_visible(roots, &strategy)
        .map(|visible| {
            let node = visible.node;
            let state = derived.get(&node.id).copied().unwrap_or_default();
            FlatTreeNode {
                id: node.id.clone(),
                label: node.label.clone(),
                level: visible.depth,
                has_children: node.is_expandable(),
                is_expanded: expanded.contains(&node.id),
                is_selected: state.selected,
                is_indeterminate: state.indeterminate,
                is_loaded: node.is_loaded(),
                parent_id: visible.parent_id.map(str::to_owned),
                pos: visible.pos,
                set_size: visible.set_size,
            }
        })
        .collect()
}
