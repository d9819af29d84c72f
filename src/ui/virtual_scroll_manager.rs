//! Virtual scrolling coordination for the row list.
//!
//! Joins the flat row list with the virtualizer's visible range and computes
//! the padding a renderer needs around the drawn slice.

use crate::domain::virtualizer::VisibleRange;
use crate::node::FlatTreeNode;
use crate::state::ViewportState;
use crate::ui::virtual_scrolling::VisibleRow;

/// Manages virtual scrolling operations for the row list.
pub struct VirtualScrollManager;

impl VirtualScrollManager {
    /// Collects rows visible in the current viewport plus overscan.
    pub fn collect_visible_rows<'a>(
        rows: &'a [FlatTreeNode],
        viewport: &ViewportState,
        active_index: Option<usize>,
    ) -> Vec<VisibleRow<'a>> {
        let range = viewport.visible_range(rows.len());
        Self::join(rows, &range, active_index)
    }

    /// Pairs each item of `range` with its row.
    ///
    /// Items past the end of `rows` are skipped.
    pub fn join<'a>(
        rows: &'a [FlatTreeNode],
        range: &VisibleRange,
        active_index: Option<usize>,
    ) -> Vec<VisibleRow<'a>> {
        range
            .items
            .iter()
            .filter_map(|item| {
                rows.get(item.index).map(|row| VisibleRow {
                    row,
                    item: *item,
                    is_active: active_index == Some(item.index),
                })
            })
            .collect()
    }

    /// Calculates top padding for virtual scrolling (space before the slice).
    pub fn calculate_top_padding(visible_rows: &[VisibleRow<'_>]) -> f32 {
        visible_rows.first().map_or(0.0, |row| row.item.start)
    }

    /// Calculates bottom padding for virtual scrolling (space after the slice).
    pub fn calculate_bottom_padding(visible_rows: &[VisibleRow<'_>], total_size: f32) -> f32 {
        let end = visible_rows.last().map_or(0.0, |row| row.item.end);
        (total_size - end).max(0.0)
    }
}
