//! Tree node data model.
//!
//! `TreeNode` is the nested value the embedder hands in. `FlatTreeNode` is the
//! read-only row snapshot produced by the flattener for every render.

use serde::{Deserialize, Serialize};

/// Node identifier. Unique across the whole tree.
pub type NodeId = String;

/// A node in the source tree.
///
/// `children: None` means "not loaded yet", `Some(vec![])` means "loaded, no
/// children". `has_children` overrides the inferred expandability so that an
/// unloaded node can still show an expander.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: NodeId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_children: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_loaded: Option<bool>,
    /// Opaque payload carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl TreeNode {
    /// Creates a leaf with no children slot (not loaded).
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: None,
            has_children: None,
            is_loaded: None,
            data: None,
        }
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_has_children(mut self, has_children: bool) -> Self {
        self.has_children = Some(has_children);
        self
    }

    pub fn with_loaded(mut self, loaded: bool) -> Self {
        self.is_loaded = Some(loaded);
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Loaded children, empty when the slot is absent.
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Explicit flag if present, otherwise "has at least one loaded child".
    pub fn is_expandable(&self) -> bool {
        self.has_children
            .unwrap_or_else(|| !self.children().is_empty())
    }

    /// Whether the node belongs in an expand-all set: non-empty children or an
    /// explicit `has_children: true`.
    pub fn expands_on_expand_all(&self) -> bool {
        !self.children().is_empty() || self.has_children == Some(true)
    }

    /// Expandable but nothing loaded under it yet.
    pub fn needs_children(&self) -> bool {
        self.is_expandable() && self.children().is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded.unwrap_or(true)
    }
}

/// A render-ready row of the flattened tree.
///
/// Built fresh on every recomputation; consumers must not infer any state
/// that is not present here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatTreeNode {
    pub id: NodeId,
    pub label: String,
    /// Zero-based depth.
    pub level: usize,
    pub has_children: bool,
    pub is_expanded: bool,
    /// Ground truth or all children selected.
    pub is_selected: bool,
    pub is_indeterminate: bool,
    pub is_loaded: bool,
    pub parent_id: Option<NodeId>,
    /// 1-based position among siblings.
    pub pos: usize,
    /// Number of siblings including this row.
    pub set_size: usize,
}
