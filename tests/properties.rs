//! Property-based invariant tests for the combobox core.
//!
//! These tests verify structural invariants that must hold for any tree and
//! any expansion/selection state:
//!
//! 1. Filtering is idempotent.
//! 2. Cascading select reaches every loaded descendant.
//! 3. After a cascading select, each ancestor is selected iff all its children are.
//! 4. Derived selection follows the all-children rule.
//! 5. No row is both selected and indeterminate.
//! 6. Rows are the expansion-guided pre-order, and deterministic.
//! 7. The visible range covers the viewport.

use std::collections::HashSet;
use proptest::prelude::*;
use treecombo::domain::flatten::derive_selection;
use treecombo::io::{generate_random_tree, RandomTreeConfig};
use treecombo::{compute_flat_list, compute_visible_range, filter_tree, toggle_selection};
use treecombo::{NodeId, NodeIndex, TreeNode};

// ── Helpers ─────────────────────────────────────────────────────────────

fn arb_tree() -> impl Strategy<Value = Vec<TreeNode>> {
    (any::<u64>(), 1usize..=4, 0usize..=4, 0.0f64..=0.3).prop_map(
        |(seed, max_depth, max_children, async_ratio)| {
            generate_random_tree(&RandomTreeConfig {
                seed,
                max_depth,
                max_children,
                async_ratio,
            })
        },
    )
}

/// Tree plus a subset of its ids chosen by `mask`.
fn arb_tree_with_subset() -> impl Strategy<Value = (Vec<TreeNode>, HashSet<NodeId>)> {
    (arb_tree(), proptest::collection::vec(any::<bool>(), 64)).prop_map(|(tree, mask)| {
        let index = NodeIndex::build(&tree);
        let subset = index
            .ids()
            .zip(mask.iter().cycle())
            .filter(|(_, keep)| **keep)
            .map(|(id, _)| id.to_owned())
            .collect();
        (tree, subset)
    })
}

fn pick_id(tree: &[TreeNode], choice: usize) -> NodeId {
    let index = NodeIndex::build(tree);
    let ids: Vec<&str> = index.ids().collect();
    ids[choice % ids.len()].to_owned()
}

/// Reference pre-order walk descending into expanded, expandable nodes.
fn reference_order(nodes: &[TreeNode], expanded: &HashSet<NodeId>, depth: usize, out: &mut Vec<(NodeId, usize)>) {
    for node in nodes {
        out.push((node.id.clone(), depth));
        if node.is_expandable() && expanded.contains(&node.id) {
            reference_order(node.children(), expanded, depth + 1, out);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Filter idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn filter_is_idempotent(tree in arb_tree(), query in "[rR0-9 -]{0,3}") {
        let once = filter_tree(&tree, &query);
        let twice = filter_tree(&once, &query);
        prop_assert_eq!(once.as_ref(), twice.as_ref());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Cascade down
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cascade_select_reaches_descendants(
        (tree, selected) in arb_tree_with_subset(),
        choice in any::<usize>(),
    ) {
        let index = NodeIndex::build(&tree);
        let id = pick_id(&tree, choice);
        let mut start = selected;
        start.remove(&id);

        let next = toggle_selection(&start, &index, &id, true);
        prop_assert!(next.contains(&id));
        for descendant in index.descendants(&id) {
            prop_assert!(next.contains(descendant), "descendant {} of {} not selected", descendant, id);
        }
    }
}

proptest! {
    #[test]
    fn cascade_deselect_clears_descendants_and_ancestors(
        (tree, selected) in arb_tree_with_subset(),
        choice in any::<usize>(),
    ) {
        let index = NodeIndex::build(&tree);
        let id = pick_id(&tree, choice);
        let mut start = selected;
        start.insert(id.clone());

        let next = toggle_selection(&start, &index, &id, true);
        prop_assert!(!next.contains(&id));
        for descendant in index.descendants(&id) {
            prop_assert!(!next.contains(descendant));
        }
        for ancestor in index.ancestors(&id) {
            prop_assert!(!next.contains(ancestor));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Cascade up
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cascade_select_updates_ancestors(
        (tree, selected) in arb_tree_with_subset(),
        choice in any::<usize>(),
    ) {
        let index = NodeIndex::build(&tree);
        let id = pick_id(&tree, choice);
        let mut start = selected;
        start.remove(&id);

        let next = toggle_selection(&start, &index, &id, true);
        for ancestor in index.ancestors(&id) {
            let children = index.children_of(ancestor);
            let all = !children.is_empty() && children.iter().all(|c| next.contains(c));
            prop_assert_eq!(next.contains(ancestor), all, "ancestor {}", ancestor);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Derived selection rule
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn derived_selection_follows_children((tree, selected) in arb_tree_with_subset()) {
        let index = NodeIndex::build(&tree);
        let derived = derive_selection(&tree, &selected);

        for id in index.ids() {
            let children = index.children_of(id);
            let all_children = !children.is_empty()
                && children.iter().all(|c| derived[c.as_str()].selected);
            let any_child = children
                .iter()
                .any(|c| derived[c.as_str()].selected || derived[c.as_str()].indeterminate);

            let state = derived[id];
            prop_assert_eq!(state.selected, selected.contains(id) || all_children, "node {}", id);
            prop_assert_eq!(state.indeterminate, !state.selected && any_child, "node {}", id);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Indeterminate exclusivity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn selected_and_indeterminate_are_exclusive((tree, selected) in arb_tree_with_subset()) {
        let expanded: HashSet<NodeId> = NodeIndex::build(&tree).ids().map(str::to_owned).collect();
        for row in compute_flat_list(&tree, &expanded, &selected) {
            prop_assert!(!(row.is_selected && row.is_indeterminate), "row {}", row.id);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Flat list ordering and stability
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rows_follow_expansion_preorder((tree, expanded) in arb_tree_with_subset()) {
        let selected = HashSet::new();
        let rows = compute_flat_list(&tree, &expanded, &selected);

        let mut expected = Vec::new();
        reference_order(&tree, &expanded, 0, &mut expected);
        let actual: Vec<(NodeId, usize)> = rows.iter().map(|r| (r.id.clone(), r.level)).collect();
        prop_assert_eq!(&actual, &expected);

        prop_assert_eq!(rows, compute_flat_list(&tree, &expanded, &selected));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Viewport coverage
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn visible_range_covers_viewport(
        count in 1usize..2000,
        size in 1u32..100,
        scroll_fraction in 0.0f64..1.2,
        height in 0u32..1000,
        overscan in 0usize..6,
    ) {
        let size = size as f32;
        let total = count as f32 * size;
        let scroll = (scroll_fraction * total as f64).floor() as f32;
        let height = height as f32;

        let range = compute_visible_range(count, |_| size, scroll, height, overscan);
        prop_assert_eq!(range.total_size, total);
        prop_assert!(!range.is_empty());

        let first = range.items.first().unwrap();
        let last = range.items.last().unwrap();
        prop_assert!(first.start <= scroll.min(total));
        prop_assert!(last.end >= (scroll + height).min(total));

        for pair in range.items.windows(2) {
            prop_assert_eq!(pair[0].index + 1, pair[1].index);
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
    }
}

#[test]
fn empty_list_never_calls_estimator() {
    let range = compute_visible_range(0, |_| panic!("estimator called"), 100.0, 100.0, 3);
    assert!(range.is_empty());
    assert_eq!(range.total_size, 0.0);
}
