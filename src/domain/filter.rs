//! Case-insensitive label filtering.

use std::borrow::Cow;
use crate::node::TreeNode;

/// Returns the pruned tree for `query`.
///
/// A node survives if its label contains the query (case-insensitively) or if
/// any descendant survives; survivors carry only their surviving children.
/// An empty query borrows the input unchanged, so callers may compare by
/// pointer for memoization.
pub fn filter_tree<'a>(nodes: &'a [TreeNode], query: &str) -> Cow<'a, [TreeNode]> {
    if query.is_empty() {
        return Cow::Borrowed(nodes);
    }
    let lower_query = query.to_lowercase();
    Cow::Owned(filter_nodes(nodes, &lower_query))
}

fn filter_nodes(nodes: &[TreeNode], lower_query: &str) -> Vec<TreeNode> {
    nodes
        .iter()
        .filter_map(|node| {
            let matches = node.label.to_lowercase().contains(lower_query);
            let filtered_children = filter_nodes(node.children(), lower_query);

            if matches || !filtered_children.is_empty() {
                Some(TreeNode {
                    children: Some(filtered_children),
                    ..node.clone_without_children()
                })
            } else {
                None
            }
        })
        .collect()
}

impl TreeNode {
    /// Shallow copy that leaves the children slot empty.
    fn clone_without_children(&self) -> TreeNode {
        TreeNode {
            id: self.id.clone(),
            label: self.label.clone(),
            children: None,
            has_children: self.has_children,
            is_loaded: self.is_loaded,
            data: self.data.clone(),
        }
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

    #[test]
    fn test_empty_query_borrows_input() {
        let tree = sample();
        let result = filter_tree(&tree, "");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert!(std::ptr::eq(result.as_ref(), tree.as_slice()));
    }

    #[test]
    fn test_keeps_ancestors_of_matches() {
        let tree = sample();
        let result = filter_tree(&tree, "Child 1-1");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
        let children = result[0].children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, "1-1");
        assert_eq!(children[0].label, "Child 1-1");
    }

    #[test]
    fn test_case_insensitive() {
        let tree = sample();
        let result = filter_tree(&tree, "pArEnT 2");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "2");
    }

    #[test]
    fn test_direct_match_keeps_only_matching_children() {
        let tree = sample();
        let result = filter_tree(&tree, "parent");
        assert_eq!(result.len(), 2);
        // Children do not contain "parent"
        assert!(result[0].children().is_empty());
    }

    #[test]
    fn test_no_matches() {
        let tree = sample();
        assert!(filter_tree(&tree, "NonExistent").is_empty());
    }

    #[test]
    fn test_idempotent() {
        let tree = sample();
        let once = filter_tree(&tree, "1-2").into_owned();
        let twice = filter_tree(&once, "1-2").into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_payload_and_flags_carried() {
        let tree = vec![TreeNode::new("x", "Remote")
            .with_has_children(true)
            .with_loaded(false)
            .with_data(serde_json::json!({"kind": "folder"}))];
        let result = filter_tree(&tree, "remote");
        assert_eq!(result[0].has_children, Some(true));
        assert_eq!(result[0].is_loaded, Some(false));
        assert_eq!(result[0].data.as_ref().unwrap()["kind"], "folder");
    }
}
