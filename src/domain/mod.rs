//! Domain logic modules for the hierarchical combobox.
//!
//! This module contains the pure, stateless core:
//! - Visibility strategies (policy-driven pre-order traversal)
//! - Flattening (tree + expansion + selection -> rows)
//! - Selection cascade (ground-truth set algebra)
//! - Filtering (case-insensitive label search)
//! - Virtualization (prefix sums and viewport slicing)
//! - Tree operations (embedder-side merge and lookup helpers)

pub mod visibility;
pub mod flatten;
pub mod selection;
pub mod filter;
pub mod virtualizer;
pub mod tree_operations;
