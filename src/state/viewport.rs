//! Scroll position and viewport size state.
//!
//! This module encapsulates the vertical scroll state of the row list and
//! turns it into a visible range through the virtualizer.

use crate::domain::virtualizer::{ItemLayout, VisibleRange};
use crate::ui::virtual_scrolling::{DEFAULT_ITEM_HEIGHT, DEFAULT_OVERSCAN, DEFAULT_VIEWPORT_HEIGHT};

/// State related to the visible viewport.
///
/// Responsibilities:
/// - Tracking vertical scroll offset and viewport height
/// - Holding the per-row size estimate and overscan
/// - Keeping a row scrolled into view for keyboard navigation
#[derive(Debug, Clone)]
pub struct ViewportState {
    /// Vertical scroll offset in pixels
    scroll_offset: f32,
    /// Visible height in pixels
    viewport_height: f32,
    /// Estimated size of every row
    item_height: f32,
    /// Extra rows rendered on each side
    overscan: usize,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportState {
    /// Creates a viewport state with default values.
    pub fn new() -> Self {
        Self {
            scroll_offset: 0.0,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            item_height: DEFAULT_ITEM_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
        }
    }

    /// Creates a viewport with explicit sizing.
    pub fn with_sizing(item_height: f32, viewport_height: f32, overscan: usize) -> Self {
        Self {
            scroll_offset: 0.0,
            viewport_height: viewport_height.max(0.0),
            item_height: item_height.max(0.0),
            overscan,
        }
    }

    /// Resets scroll position to the top.
    pub fn reset(&mut self) {
        self.scroll_offset = 0.0;
    }

    // ===== Viewport Queries =====

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn item_height(&self) -> f32 {
        self.item_height
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Builds the layout table for `count` rows.
    pub fn layout(&self, count: usize) -> ItemLayout {
        let item_height = self.item_height;
        ItemLayout::build(count, |_| item_height)
    }

    /// Computes the visible slice for `count` rows at the current scroll.
    pub fn visible_range(&self, count: usize) -> VisibleRange {
        if count == 0 {
            return VisibleRange::default();
        }
        self.layout(count)
            .visible_range(self.scroll_offset, self.viewport_height, self.overscan)
    }

    // ===== Viewport Mutations =====

    /// Sets the scroll offset (scroll notification). Clamped to >= 0.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = offset.max(0.0);
    }

    /// Sets the viewport height (resize notification). Clamped to >= 0.
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(0.0);
    }

    /// Scrolls so that the row at `index` starts at the top.
    ///
    /// # Returns
    /// `false` if `index` is out of range (nothing changes).
    pub fn scroll_to_index(&mut self, count: usize, index: usize) -> bool {
        let layout = self.layout(count);
        match layout.get(index) {
            Some(item) => {
                self.scroll_offset = item.start;
                true
            }
            None => false,
        }
    }

    /// Scrolls the minimum amount needed for the row at `index` to be fully
    /// visible.
    pub fn scroll_into_view(&mut self, count: usize, index: usize) {
        let layout = self.layout(count);
        let Some(item) = layout.get(index) else {
            return;
        };

        if item.start < self.scroll_offset {
            self.scroll_offset = item.start;
        } else if item.end > self.scroll_offset + self.viewport_height {
            self.scroll_offset = (item.end - self.viewport_height).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_scroll_clamped() {
        let mut viewport = ViewportState::new();
        viewport.set_scroll_offset(-20.0);
        assert_eq!(viewport.scroll_offset(), 0.0);
        viewport.set_viewport_height(-1.0);
        assert_eq!(viewport.viewport_height(), 0.0);
    }

    #[test]
    fn test_visible_range_uses_overscan() {
        let mut viewport = ViewportState::with_sizing(30.0, 150.0, 2);
        viewport.set_scroll_offset(300.0);
        let range = viewport.visible_range(1000);
        assert_eq!(range.start_index(), Some(8));
        assert_eq!(range.end_index(), Some(16));
    }

    #[test]
    fn test_scroll_to_index() {
        let mut viewport = ViewportState::with_sizing(32.0, 240.0, 5);
        assert!(viewport.scroll_to_index(100, 10));
        assert_eq!(viewport.scroll_offset(), 320.0);
        assert!(!viewport.scroll_to_index(100, 100));
        assert_eq!(viewport.scroll_offset(), 320.0);
    }

    #[test]
    fn test_scroll_into_view_down_and_up() {
        let mut viewport = ViewportState::with_sizing(10.0, 50.0, 0);
        viewport.scroll_into_view(100, 7);
        // Row 7 spans [70, 80); bottom edge must reach 80
        assert_eq!(viewport.scroll_offset(), 30.0);

        viewport.scroll_into_view(100, 5);
        assert_eq!(viewport.scroll_offset(), 30.0);

        viewport.scroll_into_view(100, 1);
        assert_eq!(viewport.scroll_offset(), 10.0);
    }

    #[test]
    fn test_empty_list() {
        let viewport = ViewportState::new();
        assert!(viewport.visible_range(0).is_empty());
    }
}
