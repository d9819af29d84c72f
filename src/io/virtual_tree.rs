//! In-memory tree generation for demos, benchmarks, and tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::node::TreeNode;

const DEFAULT_MAX_DEPTH: usize = 4;
const DEFAULT_MAX_CHILDREN: usize = 8;

/// Generates a uniform tree `depth` levels deep with `breadth` children per
/// node.
///
/// Ids are `prefix-i`, `prefix-i-j`, ... and labels are `Node <id>`. Nodes on
/// the last level carry an empty (loaded) child list.
pub fn generate_tree(depth: usize, breadth: usize, prefix: &str) -> Vec<TreeNode> {
    if depth == 0 {
        return Vec::new();
    }
    (0..breadth)
        .map(|i| {
            let id = format!("{prefix}-{i}");
            let children = generate_tree(depth - 1, breadth, &id);
            TreeNode::new(id.clone(), format!("Node {id}")).with_children(children)
        })
        .collect()
}

/// Generates `count` flat leaf items `item-i` labeled `Item i`.
pub fn generate_flat(count: usize) -> Vec<TreeNode> {
    (0..count)
        .map(|i| TreeNode::new(format!("item-{i}"), format!("Item {i}")))
        .collect()
}

/// Settings for [`generate_random_tree`].
#[derive(Debug, Clone)]
pub struct RandomTreeConfig {
    pub seed: u64,
    pub max_depth: usize,
    pub max_children: usize,
    /// Probability (0..=1) that a non-leaf is left unloaded
    pub async_ratio: f64,
}

impl Default for RandomTreeConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_depth: DEFAULT_MAX_DEPTH,
            max_children: DEFAULT_MAX_CHILDREN,
            async_ratio: 0.0,
        }
    }
}

/// Generates a reproducible random tree.
///
/// Some branches are left unloaded (`hasChildren: true`, no `children`,
/// `isLoaded: false`) with probability `async_ratio`, which makes the output
/// suitable for exercising the async child loader.
pub fn generate_random_tree(config: &RandomTreeConfig) -> Vec<TreeNode> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let async_ratio = config.async_ratio.clamp(0.0, 1.0);
    let num_roots = rng.gen_range(1..=config.max_children.max(1));

    (0..num_roots)
        .map(|i| generate_random_node(&mut rng, format!("r{i}"), 1, config, async_ratio))
        .collect()
}

fn generate_random_node(
    rng: &mut StdRng,
    id: String,
    depth: usize,
    config: &RandomTreeConfig,
    async_ratio: f64,
) -> TreeNode {
    let label = format!("Node {id}");
    if depth >= config.max_depth || config.max_children == 0 {
        return TreeNode::new(id, label);
    }

    let num_children = rng.gen_range(0..=config.max_children);
    if num_children == 0 {
        return TreeNode::new(id, label);
    }

    if rng.gen_bool(async_ratio) {
        return TreeNode::new(id, label).with_has_children(true).with_loaded(false);
    }

    let children = (0..num_children)
        .map(|i| generate_random_node(rng, format!("{id}-{i}"), depth + 1, config, async_ratio))
        .collect();
    TreeNode::new(id, label).with_children(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tree_operations::{collect_ids, count_nodes, max_depth};

    #[test]
    fn test_generate_tree_shape() {
        let tree = generate_tree(3, 3, "node");
        assert_eq!(tree.len(), 3);
        assert_eq!(count_nodes(&tree), 3 + 9 + 27);
        assert_eq!(tree[0].id, "node-0");
        assert_eq!(tree[0].children()[2].id, "node-0-2");
        assert_eq!(tree[0].children()[2].label, "Node node-0-2");
        // Last level is loaded but empty
        assert_eq!(tree[0].children()[0].children()[0].children, Some(vec![]));
    }

    #[test]
    fn test_generate_flat() {
        let items = generate_flat(10_000);
        assert_eq!(items.len(), 10_000);
        assert_eq!(items[9_999].id, "item-9999");
        assert_eq!(items[9_999].label, "Item 9999");
        assert!(items.iter().all(|n| n.children.is_none()));
    }

    #[test]
    fn test_random_tree_is_reproducible() {
        let config = RandomTreeConfig {
            seed: 7,
            async_ratio: 0.3,
            ..Default::default()
        };
        assert_eq!(generate_random_tree(&config), generate_random_tree(&config));
    }

    #[test]
    fn test_random_tree_respects_limits() {
        let config = RandomTreeConfig {
            seed: 11,
            max_depth: 3,
            max_children: 4,
            async_ratio: 0.0,
        };
        let tree = generate_random_tree(&config);
        assert!(max_depth(&tree) <= 3);
        assert_eq!(collect_ids(&tree).len(), count_nodes(&tree));
    }

    #[test]
    fn test_full_async_ratio_leaves_branches_unloaded() {
        let config = RandomTreeConfig {
            seed: 3,
            max_depth: 3,
            max_children: 5,
            async_ratio: 1.0,
        };
        let tree = generate_random_tree(&config);
        for root in &tree {
            assert!(root.children.is_none());
        }
    }
}
