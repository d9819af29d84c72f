//! I/O modules for tree files, tree generation, and background child loading.

pub mod loading_state;
pub mod async_loader;
pub mod tree_file;
pub mod virtual_tree;

// Re-export commonly used types
pub use loading_state::{LoadingGuard, LoadingState};
pub use async_loader::{AsyncChildLoader, LoadResult};
pub use tree_file::{read_tree, write_tree};
pub use virtual_tree::{generate_flat, generate_random_tree, generate_tree, RandomTreeConfig};
