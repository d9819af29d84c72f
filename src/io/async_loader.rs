//! Asynchronous child loading.
//!
//! This module runs caller-supplied child loaders on background threads,
//! keeping the event loop responsive while remote subtrees are fetched.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};
use crate::io::loading_state::{lock_state, LoadingGuard, LoadingState};
use crate::node::{NodeId, TreeNode};
use crate::traits::ChildLoader;

/// Result of a completed child load.
#[derive(Debug)]
pub enum LoadResult {
    /// Loader returned successfully
    Loaded {
        /// The node whose children were fetched
        node_id: NodeId,
        /// Fetched children (None when the loader had nothing to merge)
        children: Option<Vec<TreeNode>>,
    },
    /// Loader returned an error or panicked
    Failed {
        node_id: NodeId,
        error: String,
    },
}

impl LoadResult {
    pub fn node_id(&self) -> &str {
        match self {
            LoadResult::Loaded { node_id, .. } | LoadResult::Failed { node_id, .. } => node_id,
        }
    }
}

/// Manages background child loads.
///
/// Each load runs on its own thread. The per-node loading flag is held by a
/// [`LoadingGuard`] that is dropped before the result is sent, so by the time
/// a result is observed through [`poll`](Self::poll) the flag is already
/// clear. Dropping the loader drops the receiver, which turns late
/// completions into no-ops.
pub struct AsyncChildLoader {
    /// Caller-supplied fetch function
    loader: Arc<dyn ChildLoader>,

    /// Shared set of in-flight node ids
    loading_state: Arc<Mutex<LoadingState>>,

    /// Channel for completed loads
    sender: Sender<LoadResult>,
    receiver: Receiver<LoadResult>,
}

impl AsyncChildLoader {
    /// Creates a loader around `loader` with nothing in flight.
    pub fn new(loader: Arc<dyn ChildLoader>) -> Self {
        let (sender, receiver) = channel();
        Self {
            loader,
            loading_state: Arc::new(Mutex::new(LoadingState::new())),
            sender,
            receiver,
        }
    }

    /// Creates a loader from any [`ChildLoader`] implementation.
    pub fn from_loader<L>(loader: L) -> Self
    where
        L: ChildLoader + 'static,
    {
        Self::new(Arc::new(loader))
    }

    /// Creates a loader from a closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<Option<Vec<TreeNode>>> + Send + Sync + 'static,
    {
        Self::new(Arc::new(f))
    }

    // ===== Queries =====

    /// Checks if a load for `node_id` is in flight.
    pub fn is_loading(&self, node_id: &str) -> bool {
        lock_state(&self.loading_state).in_progress.contains(node_id)
    }

    /// Checks if any load is in flight.
    pub fn has_pending(&self) -> bool {
        !lock_state(&self.loading_state).in_progress.is_empty()
    }

    /// Returns the in-flight node ids in sorted order.
    pub fn loading_ids(&self) -> Vec<NodeId> {
        lock_state(&self.loading_state).in_progress.iter().cloned().collect()
    }

    // ===== Loading =====

    /// Starts loading the children of `node_id` on a background thread.
    ///
    /// Call [`poll`](Self::poll) regularly (e.g., once per event loop turn)
    /// to collect results.
    ///
    /// # Returns
    /// `false` if a load for this node is already in flight (the request is
    /// ignored), `true` if a new load was started.
    pub fn start(&self, node_id: &str) -> bool {
        let Some(guard) = LoadingGuard::acquire(&self.loading_state, node_id) else {
            debug!(node_id, "load already in flight, ignoring request");
            return false;
        };

        debug!(node_id, "starting child load");
        let loader = Arc::clone(&self.loader);
        let sender = self.sender.clone();

        thread::spawn(move || {
            let node_id = guard.node_id().to_owned();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| loader.load_children(&node_id)));

            // Flag must be clear before anyone can observe the result
            drop(guard);

            let result = match outcome {
                Ok(Ok(children)) => LoadResult::Loaded { node_id, children },
                Ok(Err(err)) => LoadResult::Failed {
                    node_id,
                    error: format!("{err:#}"),
                },
                Err(_) => LoadResult::Failed {
                    node_id,
                    error: "child loader panicked".to_owned(),
                },
            };

            // Receiver is gone when the owner was torn down
            let _ = sender.send(result);
        });

        true
    }

    /// Collects every load that completed since the last call (non-blocking).
    pub fn poll(&self) -> Vec<LoadResult> {
        let results: Vec<LoadResult> = self.receiver.try_iter().collect();
        for result in &results {
            log_result(result);
        }
        results
    }

    /// Blocks up to `timeout` for the next completed load.
    ///
    /// # Returns
    /// `None` if nothing completed in time.
    pub fn wait_for(&self, timeout: Duration) -> Option<LoadResult> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => {
                log_result(&result);
                Some(result)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

fn log_result(result: &LoadResult) {
    match result {
        LoadResult::Loaded { node_id, children } => {
            let count = children.as_ref().map_or(0, Vec::len);
            debug!(node_id = node_id.as_str(), count, "child load completed");
        }
        LoadResult::Failed { node_id, error } => {
            warn!(node_id = node_id.as_str(), error = error.as_str(), "child load failed");
        }
    }
}
