//! Shared loading state for background child loads.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};
use crate::node::NodeId;

/// Holds the ids whose children are currently being fetched.
///
/// Results come through a channel; only the in-flight set is shared.
/// This struct is wrapped in an `Arc<Mutex<>>` to allow safe sharing between
/// the main thread and background loading threads.
#[derive(Debug, Default)]
pub struct LoadingState {
    /// Node ids with a load in flight
    pub in_progress: BTreeSet<NodeId>,
}

impl LoadingState {
    /// Creates a loading state with nothing in flight.
    pub fn new() -> Self {
        Self {
            in_progress: BTreeSet::new(),
        }
    }
}

/// Locks the shared state, recovering from a poisoned mutex.
///
/// A panicking loader thread must not wedge the loading flags.
pub(crate) fn lock_state(state: &Mutex<LoadingState>) -> MutexGuard<'_, LoadingState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Scoped ownership of one node's loading flag.
///
/// Acquiring inserts the id; dropping removes it. Because the flag is cleared
/// in `Drop`, it is released on success, on error, and on panic alike.
pub struct LoadingGuard {
    state: Arc<Mutex<LoadingState>>,
    node_id: NodeId,
}

impl LoadingGuard {
    /// Marks `node_id` as loading.
    ///
    /// # Returns
    /// `None` if the node is already loading.
    pub fn acquire(state: &Arc<Mutex<LoadingState>>, node_id: &str) -> Option<Self> {
        let inserted = lock_state(state).in_progress.insert(node_id.to_owned());
        inserted.then(|| Self {
            state: Arc::clone(state),
            node_id: node_id.to_owned(),
        })
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        lock_state(&self.state).in_progress.remove(&self.node_id);
    }
}
