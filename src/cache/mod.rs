//! Derived structures rebuilt when the tree snapshot changes.

pub mod node_index;

// Re-export commonly used types
pub use node_index::{IndexEntry, NodeIndex};
