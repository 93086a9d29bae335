use std::ops::Range;

use super::{ScrollAlign, ScrollIntoView};
use crate::config::FilmstripConfig;

/// Horizontal fixed-size list that only renders the tiles in view.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualStrip {
    item_count: usize,
    item_size: f64,
    viewport_width: f64,
    scroll_offset: f64,
}

impl VirtualStrip {
    pub fn new(item_count: usize, item_size: f64, viewport_width: f64) -> Self {
        Self {
            item_count,
            item_size: item_size.max(1.0),
            viewport_width: viewport_width.max(0.0),
            scroll_offset: 0.0,
        }
    }

    /// Strip sized relative to the host's client width.
    pub fn for_client(item_count: usize, config: &FilmstripConfig, client_width: f64) -> Self {
        Self::new(item_count, config.item_size, config.width_ratio * client_width)
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn content_width(&self) -> f64 {
        self.item_count as f64 * self.item_size
    }

    fn max_offset(&self) -> f64 {
        (self.content_width() - self.viewport_width).max(0.0)
    }

    /// Keeps the current offset valid after the host resizes the strip.
    pub fn set_viewport_width(&mut self, viewport_width: f64) {
        self.viewport_width = viewport_width.max(0.0);
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_offset());
    }

    /// Tiles intersecting the viewport.
    pub fn visible_range(&self) -> Range<usize> {
        if self.item_count == 0 || self.viewport_width == 0.0 {
            return 0..0;
        }
        let first = (self.scroll_offset / self.item_size).floor() as usize;
        let last = ((self.scroll_offset + self.viewport_width) / self.item_size).ceil() as usize;
        first.min(self.item_count)..last.min(self.item_count)
    }

    fn offset_for(&self, index: usize, align: ScrollAlign) -> f64 {
        let item_start = index as f64 * self.item_size;
        let start_aligned = item_start;
        let end_aligned = item_start - self.viewport_width + self.item_size;
        let target = match align {
            ScrollAlign::Start => start_aligned,
            ScrollAlign::End => end_aligned,
            ScrollAlign::Center => item_start - (self.viewport_width - self.item_size) / 2.0,
            ScrollAlign::Auto => {
                if self.scroll_offset > start_aligned {
                    start_aligned
                } else if self.scroll_offset < end_aligned {
                    end_aligned
                } else {
                    self.scroll_offset
                }
            }
        };
        target.clamp(0.0, self.max_offset())
    }
}

impl ScrollIntoView for VirtualStrip {
    fn scroll_to_item(&mut self, index: usize, align: ScrollAlign) {
        if self.item_count == 0 {
            return;
        }
        let index = index.min(self.item_count - 1);
        self.scroll_offset = self.offset_for(index, align);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_alignment_puts_item_mid_viewport() {
        let mut strip = VirtualStrip::new(50, 100.0, 600.0);

        strip.scroll_to_item(10, ScrollAlign::Center);

        assert_eq!(strip.scroll_offset(), 750.0);
        assert_eq!(strip.visible_range(), 7..14);
    }

    #[test]
    fn center_alignment_clamps_at_both_ends() {
        let mut strip = VirtualStrip::new(50, 100.0, 600.0);

        strip.scroll_to_item(1, ScrollAlign::Center);
        assert_eq!(strip.scroll_offset(), 0.0);

        strip.scroll_to_item(49, ScrollAlign::Center);
        assert_eq!(strip.scroll_offset(), 4400.0);
        assert_eq!(strip.visible_range(), 44..50);
    }

    #[test]
    fn auto_alignment_scrolls_minimally() {
        let mut strip = VirtualStrip::new(50, 100.0, 600.0);

        strip.scroll_to_item(3, ScrollAlign::Auto);
        assert_eq!(strip.scroll_offset(), 0.0);

        strip.scroll_to_item(8, ScrollAlign::Auto);
        assert_eq!(strip.scroll_offset(), 300.0);

        strip.scroll_to_item(2, ScrollAlign::Auto);
        assert_eq!(strip.scroll_offset(), 200.0);
    }

    #[test]
    fn start_and_end_alignment() {
        let mut strip = VirtualStrip::new(50, 100.0, 600.0);

        strip.scroll_to_item(10, ScrollAlign::Start);
        assert_eq!(strip.scroll_offset(), 1000.0);

        strip.scroll_to_item(10, ScrollAlign::End);
        assert_eq!(strip.scroll_offset(), 500.0);
    }

    #[test]
    fn short_strip_never_scrolls() {
        let mut strip = VirtualStrip::new(3, 100.0, 600.0);

        strip.scroll_to_item(2, ScrollAlign::Center);

        assert_eq!(strip.scroll_offset(), 0.0);
        assert_eq!(strip.visible_range(), 0..3);
    }

    #[test]
    fn empty_strip_ignores_scroll_requests() {
        let mut strip = VirtualStrip::new(0, 100.0, 600.0);
        strip.scroll_to_item(4, ScrollAlign::Center);
        assert_eq!(strip.scroll_offset(), 0.0);
        assert_eq!(strip.visible_range(), 0..0);
    }

    #[test]
    fn resize_reclamps_offset() {
        let mut strip = VirtualStrip::new(10, 100.0, 300.0);
        strip.scroll_to_item(9, ScrollAlign::End);
        assert_eq!(strip.scroll_offset(), 700.0);

        strip.set_viewport_width(600.0);
        assert_eq!(strip.scroll_offset(), 400.0);
    }

    #[test]
    fn for_client_uses_width_ratio() {
        let strip = VirtualStrip::for_client(50, &FilmstripConfig::default(), 1000.0);
        assert_eq!(strip.viewport_width(), 600.0);
        assert_eq!(strip.content_width(), 5000.0);
    }
}
