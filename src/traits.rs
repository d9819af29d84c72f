use crate::node::TreeNode;

/// Trait for fetching the children of a node that was not loaded up front.
///
/// Implementations run on a background thread, so they must be `Send + Sync`.
/// The returned nodes are handed back to the embedder, which merges them into
/// its tree; the engine itself only tracks the loading flag.
///
/// - `Ok(Some(children))`: children were fetched
/// - `Ok(None)`: nothing to merge (the node has no children after all)
/// - `Err(_)`: the fetch failed; the node stays expandable so it can be retried
pub trait ChildLoader: Send + Sync {
    /// Loads the children of `node_id` (blocking).
    fn load_children(&self, node_id: &str) -> anyhow::Result<Option<Vec<TreeNode>>>;
}

impl<F> ChildLoader for F
where
    F: Fn(&str) -> anyhow::Result<Option<Vec<TreeNode>>> + Send + Sync,
{
    fn load_children(&self, node_id: &str) -> anyhow::Result<Option<Vec<TreeNode>>> {
        self(node_id)
    }
}

/// Trait for embedders that filter remotely.
///
/// When a delegate is installed the combobox stops filtering locally and
/// expects an already-filtered tree through `set_data`.
pub trait SearchDelegate {
    /// Called on every text input change.
    fn on_query_change(&self, query: &str);
}

impl<F> SearchDelegate for F
where
    F: Fn(&str),
{
    fn on_query_change(&self, query: &str) {
        self(query)
    }
}
