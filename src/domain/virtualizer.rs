//! Windowed virtualization over estimated item sizes.
//!
//! This module provides pure functions for:
//! - Building a prefix-sum layout table from per-item size estimates
//! - Locating the item under a pixel offset by binary search
//! - Computing the minimal visible slice plus overscan
//!
//! No measurement is modeled: the estimator is assumed stable per index.

/// Position of one item in the virtual content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualItem {
    pub index: usize,
    pub start: f32,
    pub size: f32,
    pub end: f32,
}

/// Prefix-sum table of item extents.
#[derive(Debug, Clone, Default)]
pub struct ItemLayout {
    items: Vec<VirtualItem>,
}

impl ItemLayout {
    /// Builds the table by calling `estimate_size` once per index.
    ///
    /// Negative or NaN estimates are clamped to zero so offsets stay monotonic.
    /// Offsets are summed in `f64` and narrowed per item, so a million rows
    /// do not drift; an item's `end` is always bit-equal to the next `start`.
    pub fn build<F>(count: usize, mut estimate_size: F) -> Self
    where
        F: FnMut(usize) -> f32,
    {
        let mut items = Vec::with_capacity(count);
        let mut offset = 0.0_f64;
        for index in 0..count {
            let size = estimate_size(index).max(0.0);
            let next = offset + f64::from(size);
            items.push(VirtualItem {
                index,
                start: offset as f32,
                size,
                end: next as f32,
            });
            offset = next;
        }
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VirtualItem> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[VirtualItem] {
        &self.items
    }

    /// Total content size (end of the last item, 0 when empty).
    pub fn total_size(&self) -> f32 {
        self.items.last().map(|item| item.end).unwrap_or(0.0)
    }

    /// Returns the smallest index whose `[start, end)` contains `offset`.
    ///
    /// Offsets before the first item yield 0; offsets past the content yield
    /// the last index. Returns 0 for an empty table.
    pub fn find_index(&self, offset: f32) -> usize {
        if self.items.is_empty() {
            return 0;
        }
        let index = self.items.partition_point(|item| item.end <= offset);
        index.min(self.items.len() - 1)
    }

    /// Computes the visible slice for a viewport.
    ///
    /// The viewport is the half-open interval `[scroll_offset, scroll_offset +
    /// viewport_height)`: an item that starts exactly at the bottom edge is not
    /// part of it. Both bounds are then widened by `overscan` and clamped.
    pub fn visible_range(
        &self,
        scroll_offset: f32,
        viewport_height: f32,
        overscan: usize,
    ) -> VisibleRange {
        if self.items.is_empty() {
            return VisibleRange::default();
        }

        let last = self.items.len() - 1;
        let viewport_height = viewport_height.max(0.0);
        let range_start = scroll_offset;
        let range_end = scroll_offset + viewport_height;

        let start_index = self.find_index(range_start);
        let mut end_index = self.find_index(range_end);

        if end_index > start_index && self.items[end_index].start >= range_end {
            end_index -= 1;
        }

        // Make sure the bottom edge is covered
        if end_index < last && self.items[end_index].end < range_end {
            end_index += 1;
        }

        let start_index = start_index.saturating_sub(overscan);
        let end_index = end_index.saturating_add(overscan).min(last);

        VisibleRange {
            items: self.items[start_index..=end_index].to_vec(),
            total_size: self.total_size(),
        }
    }
}

/// Result of a viewport computation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibleRange {
    /// Items to render, in index order
    pub items: Vec<VirtualItem>,
    /// Total content size for the scroll container
    pub total_size: f32,
}

impl VisibleRange {
    pub fn start_index(&self) -> Option<usize> {
        self.items.first().map(|item| item.index)
    }

    pub fn end_index(&self) -> Option<usize> {
        self.items.last().map(|item| item.index)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Computes the visible slice of `count` items in one call.
///
/// `count == 0` returns an empty range with total size 0 without invoking
/// the estimator.
///
/// # Example
/// ```
/// use treecombo::domain::virtualizer::compute_visible_range;
///
/// let range = compute_visible_range(1000, |_| 30.0, 300.0, 150.0, 2);
/// assert_eq!(range.start_index(), Some(8));
/// assert_eq!(range.end_index(), Some(16));
/// assert_eq!(range.total_size, 30000.0);
/// ```
pub fn compute_visible_range<F>(
    count: usize,
    estimate_size: F,
    scroll_offset: f32,
    viewport_height: f32,
    overscan: usize,
) -> VisibleRange
where
    F: FnMut(usize) -> f32,
{
    if count == 0 {
        return VisibleRange::default();
    }
    ItemLayout::build(count, estimate_size).visible_range(scroll_offset, viewport_height, overscan)
}
