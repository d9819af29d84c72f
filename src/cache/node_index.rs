//! Id → relationship index over the current tree snapshot.

use std::collections::{HashMap, HashSet};
use crate::node::{NodeId, TreeNode};

/// Relationship data for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Parent id, `None` for roots
    pub parent_id: Option<NodeId>,
    /// Loaded child ids in declared order
    pub child_ids: Vec<NodeId>,
    /// Node label (kept for tag display without a tree walk)
    pub label: String,
    /// Explicit or inferred expandability
    pub expandable: bool,
    /// Member of the expand-all set
    pub expands_on_expand_all: bool,
    /// Expandable but with no loaded children yet
    pub needs_children: bool,
}

/// Flat index of the nested tree.
///
/// This index is the only derived structure the engine keeps between events.
/// It is rebuilt from scratch whenever the tree snapshot is replaced:
/// - After local filtering changes the visible tree
/// - After the embedder merges an async child load
/// - After a full data replacement
///
/// Duplicate ids are not detected: the last node visited in pre-order wins.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    entries: HashMap<NodeId, IndexEntry>,
    /// Ids in pre-order, used for deterministic iteration.
    order: Vec<NodeId>,
    /// Incremented on every rebuild.
    generation: u64,
}

impl NodeIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index over `roots`.
    pub fn build(roots: &[TreeNode]) -> Self {
        let mut index = Self::new();
        index.rebuild(roots);
        index
    }

    /// Discards every entry and re-traverses `roots`.
    ///
    /// Uses an explicit stack so that very deep trees cannot overflow the
    /// call stack.
    pub fn rebuild(&mut self, roots: &[TreeNode]) {
        self.entries.clear();
        self.order.clear();
        self.generation += 1;

        let mut stack: Vec<(&TreeNode, Option<&str>)> =
            roots.iter().rev().map(|node| (node, None)).collect();

        while let Some((node, parent_id)) = stack.pop() {
            let children = node.children();
            self.entries.insert(
                node.id.clone(),
                IndexEntry {
                    parent_id: parent_id.map(str::to_owned),
                    child_ids: children.iter().map(|c| c.id.clone()).collect(),
                    label: node.label.clone(),
                    expandable: node.is_expandable(),
                    expands_on_expand_all: node.expands_on_expand_all(),
                    needs_children: node.needs_children(),
                },
            );
            self.order.push(node.id.clone());

            for child in children.iter().rev() {
                stack.push((child, Some(node.id.as_str())));
            }
        }
    }

    /// Returns the rebuild counter.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&IndexEntry> {
        self.entries.get(id)
    }

    /// Returns the parent id of `id`, if any.
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.entries.get(id)?.parent_id.as_deref()
    }

    /// Returns the loaded child ids of `id` (empty for unknown ids).
    pub fn children_of(&self, id: &str) -> &[NodeId] {
        self.entries
            .get(id)
            .map(|entry| entry.child_ids.as_slice())
            .unwrap_or(&[])
    }

    /// Iterates ancestors of `id`, nearest first.
    ///
    /// Duplicate ids can make the parent chain cyclic (`x -> [x]` records `x`
    /// as its own parent). The walk stops at the first repeated id, and `id`
    /// itself is never yielded.
    pub fn ancestors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let mut seen: HashSet<&'a str> = HashSet::from([id]);
        let mut current = self.parent_of(id);
        std::iter::from_fn(move || {
            let parent = current.filter(|parent| seen.insert(*parent))?;
            current = self.parent_of(parent);
            Some(parent)
        })
    }

    /// Collects every loaded descendant of `id` (excluding `id` itself).
    pub fn descendants(&self, id: &str) -> Vec<&str> {
        let mut result = Vec::new();
        let mut stack: Vec<&str> = self.children_of(id).iter().rev().map(String::as_str).collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children_of(current).iter().rev().map(String::as_str));
        }
        result
    }

    /// Ids in tree pre-order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Ids that belong in the expand-all set.
    pub fn expandable_ids(&self) -> impl Iterator<Item = &str> {
        self.ids()
            .filter(|id| self.entries.get(*id).is_some_and(|e| e.expands_on_expand_all))
    }
}
