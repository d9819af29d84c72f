//! Virtual scrolling data structures and constants.
//!
//! This module provides types and constants used by the virtual scrolling system
//! for rendering only the visible slice of a large flattened tree.
//!
//! The offset arithmetic lives in the virtualizer in the domain module.

use crate::domain::virtualizer::VirtualItem;
use crate::node::FlatTreeNode;

/// Estimated row height in pixels
pub const DEFAULT_ITEM_HEIGHT: f32 = 32.0;

/// Default list viewport height in pixels
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 240.0;

/// Number of rows to render above/below viewport for smooth scrolling
pub const DEFAULT_OVERSCAN: usize = 5;

/// Horizontal indent per tree level in pixels
pub const INDENT_PER_LEVEL: f32 = 16.0;

/// A row the renderer should draw, with its absolute vertical placement.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRow<'a> {
    /// The row snapshot (read-only)
    pub row: &'a FlatTreeNode,

    /// Placement in the full list
    pub item: VirtualItem,

    /// Whether this row has keyboard focus
    pub is_active: bool,
}

impl VisibleRow<'_> {
    /// Left indent for the row's level.
    pub fn indent(&self) -> f32 {
        self.row.level as f32 * INDENT_PER_LEVEL
    }
}
