use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualizerOptions {
    pub count: usize,
    pub item_size: f64,
    pub overscan: usize,
    pub viewport_size: f64,
}

impl Default for VirtualizerOptions {
    fn default() -> Self {
        Self {
            count: 0,
            item_size: 35.0,
            overscan: 20,
            viewport_size: 600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualItem {
    pub index: usize,
    pub start: f64,
    pub size: f64,
}

impl VirtualItem {
    pub fn end(&self) -> f64 {
        self.start + self.size
    }
}

/// Windowing over a list of fixed-size rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Virtualizer {
    options: VirtualizerOptions,
    scroll_offset: f64,
}

impl Virtualizer {
    pub fn new(options: VirtualizerOptions) -> Self {
        Self {
            options,
            scroll_offset: 0.0,
        }
    }

    pub fn options(&self) -> &VirtualizerOptions {
        &self.options
    }

    pub fn total_size(&self) -> f64 {
        self.options.count as f64 * self.options.item_size
    }

    pub fn max_scroll_offset(&self) -> f64 {
        (self.total_size() - self.options.viewport_size).max(0.0)
    }

    /// Offsets past either end are clamped; content may have shrunk since the
    /// offset was read.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = if offset.is_finite() {
            offset.clamp(0.0, self.max_scroll_offset())
        } else {
            0.0
        };
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Rows intersecting the viewport, without overscan.
    pub fn visible_range(&self) -> Option<RangeInclusive<usize>> {
        let VirtualizerOptions {
            count,
            item_size,
            viewport_size,
            ..
        } = self.options;
        if count == 0 || !(item_size > 0.0) || !(viewport_size > 0.0) {
            return None;
        }

        let last_index = count - 1;
        let first = ((self.scroll_offset / item_size).floor() as usize).min(last_index);
        // Last row whose start lies before the bottom edge
        let last = (((self.scroll_offset + viewport_size) / item_size).ceil() as usize)
            .saturating_sub(1)
            .clamp(first, last_index);
        Some(first..=last)
    }

    /// The visible range widened by the overscan on both sides.
    pub fn virtual_items(&self) -> Vec<VirtualItem> {
        let Some(range) = self.visible_range() else {
            return Vec::new();
        };
        let start = range.start().saturating_sub(self.options.overscan);
        let end = range
            .end()
            .saturating_add(self.options.overscan)
            .min(self.options.count - 1);

        (start..=end)
            .map(|index| VirtualItem {
                index,
                start: index as f64 * self.options.item_size,
                size: self.options.item_size,
            })
            .collect()
    }

    /// Scroll offset that puts `index` at the top of the viewport.
    pub fn offset_for_index(&self, index: usize) -> f64 {
        let index = index.min(self.options.count.saturating_sub(1));
        (index as f64 * self.options.item_size).min(self.max_scroll_offset())
    }
}
