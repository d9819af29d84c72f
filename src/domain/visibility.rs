//! Visibility strategy pattern for tree traversal.
//!
//! This module separates traversal mechanics (implemented once, iteratively)
//! from the policy that decides which nodes are emitted and which subtrees are
//! entered. The flattener uses `ExpandedStrategy`; whole-tree walks use
//! `UnfilteredStrategy`.

use std::collections::HashSet;
use crate::node::{NodeId, TreeNode};

/// Strategy for determining node visibility during tree traversal.
pub trait VisibilityStrategy {
    /// Should the node be yielded at the given depth?
    ///
    /// Returning `false` does not stop the traversal from descending into the
    /// node's children; that is governed by `descend_into`.
    fn include(&self, _node: &TreeNode, _depth: usize) -> bool {
        true
    }

    /// Should the traversal visit the node's loaded children?
    fn descend_into(&self, node: &TreeNode, depth: usize) -> bool;
}

/// Include every node and always descend.
pub struct UnfilteredStrategy;

impl VisibilityStrategy for UnfilteredStrategy {
    fn descend_into(&self, _node: &TreeNode, _depth: usize) -> bool {
        true
    }
}

/// Descend only into nodes that are expandable and present in the expansion set.
pub struct ExpandedStrategy<'s> {
    pub expanded: &'s HashSet<NodeId>,
}

impl VisibilityStrategy for ExpandedStrategy<'_> {
    fn descend_into(&self, node: &TreeNode, _depth: usize) -> bool {
        node.is_expandable() && self.expanded.contains(&node.id)
    }
}

/// A node yielded by the traversal, with its position metadata.
#[derive(Debug, Clone, Copy)]
pub struct VisibleNode<'a> {
    pub node: &'a TreeNode,
    /// Depth in the hierarchy (0 for roots)
    pub depth: usize,
    pub parent_id: Option<&'a str>,
    /// 1-based position among siblings
    pub pos: usize,
    /// Sibling count
    pub set_size: usize,
}

/// Stack frame for iterative depth-first traversal.
struct TraversalFrame<'a> {
    node: &'a TreeNode,
    depth: usize,
    parent_id: Option<&'a str>,
    pos: usize,
    set_size: usize,
}

/// Pre-order iterator driven by a visibility strategy.
///
/// Uses an explicit stack so traversal depth is bounded by heap, not by the
/// call stack. Children are pushed in reverse so they pop in declared order.
pub struct TraversalIter<'a, 's, S: VisibilityStrategy> {
    stack: Vec<TraversalFrame<'a>>,
    strategy: &'s S,
}

impl<'a, 's, S: VisibilityStrategy> TraversalIter<'a, 's, S> {
    fn new(roots: &'a [TreeNode], strategy: &'s S) -> Self {
        let mut stack = Vec::with_capacity(roots.len());
        push_siblings(&mut stack, roots, 0, None);
        TraversalIter { stack, strategy }
    }
}

fn push_siblings<'a>(
    stack: &mut Vec<TraversalFrame<'a>>,
    siblings: &'a [TreeNode],
    depth: usize,
    parent_id: Option<&'a str>,
) {
    let set_size = siblings.len();
    for (i, node) in siblings.iter().enumerate().rev() {
        stack.push(TraversalFrame {
            node,
            depth,
            parent_id,
            pos: i + 1,
            set_size,
        });
    }
}

impl<'a, 's, S: VisibilityStrategy> Iterator for TraversalIter<'a, 's, S> {
    type Item = VisibleNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            let node = frame.node;

            if self.strategy.descend_into(node, frame.depth) {
                push_siblings(&mut self.stack, node.children(), frame.depth + 1, Some(node.id.as_str()));
            }

            if self.strategy.include(node, frame.depth) {
                return Some(VisibleNode {
                    node,
                    depth: frame.depth,
                    parent_id: frame.parent_id,
                    pos: frame.pos,
                    set_size: frame.set_size,
                });
            }
        }

        None
    }
}

/// Unified traversal that yields visible nodes in depth-first pre-order.
///
/// # Example
/// ```
/// use treecombo::TreeNode;
/// use treecombo::domain::visibility::{traverse_visible, UnfilteredStrategy};
///
/// let roots = vec![TreeNode::new("a", "A").with_children(vec![TreeNode::new("b", "B")])];
/// let ids: Vec<&str> = traverse_visible(&roots, &UnfilteredStrategy)
///     .map(|v| v.node.id.as_str())
///     .collect();
/// assert_eq!(ids, vec!["a", "b"]);
/// ```
pub fn traverse_visible<'a, 's, S: VisibilityStrategy>(
    roots: &'a [TreeNode],
    strategy: &'s S,
) -> TraversalIter<'a, 's, S> {
    TraversalIter::new(roots, strategy)
}
