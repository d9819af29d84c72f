//! Hierarchical multi-select combobox core.
//!
//! A search box over a large nested tree: filtering, expand/collapse with
//! asynchronously loaded subtrees, cascading multi-selection with
//! indeterminate states, and windowed virtualization of the flattened rows.
//!
//! The crate is organized the same way top to bottom:
//! - `domain/` - Pure algorithms (flatten, selection cascade, filter, virtualizer)
//! - `cache/` - The node index derived from each tree snapshot
//! - `state/` - Expansion, selection, interaction, and viewport state
//! - `io/` - Tree files, tree generation, and background child loading
//! - `app/` - The tree engine, the combobox coordinator, and settings
//! - `ui/` - Keyboard handling and virtual scrolling helpers for renderers
//! - `utils/` - Formatting helpers

pub mod traits;
pub mod node;
pub mod config;
pub mod cache;
pub mod domain;
pub mod state;
pub mod io;
pub mod app;
pub mod ui;
pub mod utils;

// Export data model
pub use node::{FlatTreeNode, NodeId, TreeNode};

// Export collaborator traits
pub use traits::{ChildLoader, SearchDelegate};

// Export configuration
pub use config::ComboboxConfig;

// Export the engine and coordinator
pub use app::{Combobox, SelectedTag, TreeEngine};
pub use cache::NodeIndex;

// Export core algorithms
pub use domain::filter::filter_tree;
pub use domain::flatten::compute_flat_list;
pub use domain::selection::toggle_selection;
pub use domain::virtualizer::{compute_visible_range, ItemLayout, VirtualItem, VisibleRange};

// Export async loading
pub use io::{AsyncChildLoader, LoadResult};

// Export keyboard types
pub use ui::input::{Key, KeyResult, RowAction};
