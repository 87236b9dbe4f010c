//! Viewport geometry and keep-visible scroll math.

use serde::{Deserialize, Serialize};

use super::CellBox;

/// Visible area of the grid's scroll container, as reported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Horizontal scroll offset in content pixels
    pub scroll_x: f32,
    /// Vertical scroll offset in content pixels
    pub scroll_y: f32,
    /// Visible width in pixels
    pub width: f32,
    /// Visible height in pixels
    pub height: f32,
    /// Width of the sticky row-label band pinned to the left edge
    pub sticky_width: f32,
    /// Height of the sticky column-letter band pinned to the top edge
    pub sticky_height: f32,
}

/// New scroll offsets for the container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub left: f32,
    pub top: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Viewport {
    /// Unscrolled viewport without sticky bands
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
            sticky_width: 0.0,
            sticky_height: 0.0,
        }
    }

    pub fn with_sticky(mut self, sticky_width: f32, sticky_height: f32) -> Self {
        self.sticky_width = sticky_width;
        self.sticky_height = sticky_height;
        self
    }

    pub fn with_scroll(mut self, scroll_x: f32, scroll_y: f32) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }

    pub fn offset(&self) -> ScrollOffset {
        ScrollOffset {
            left: self.scroll_x,
            top: self.scroll_y,
        }
    }

    /// Move to the given offsets, e.g. after [`scroll_target`].
    pub fn apply(&mut self, offset: ScrollOffset) {
        self.scroll_x = offset.left;
        self.scroll_y = offset.top;
    }

    /// True if no part of `cell` is hidden behind a sticky band or past an edge.
    pub fn is_fully_visible(&self, cell: &CellBox) -> bool {
        cell.left >= self.scroll_x + self.sticky_width
            && cell.right <= self.scroll_x + self.width
            && cell.top >= self.scroll_y + self.sticky_height
            && cell.bottom <= self.scroll_y + self.height
    }
}

/// Minimal scroll offsets that bring `cell` fully into view.
///
/// Per axis: if the leading edge is hidden behind the sticky band, align it
/// just past the band; else if the trailing edge is past the viewport, scroll
/// just far enough to show it; otherwise keep the current offset. Offsets
/// never go negative.
pub fn scroll_target(cell: &CellBox, viewport: &Viewport) -> ScrollOffset {
    ScrollOffset {
        left: axis_target(
            cell.left,
            cell.right,
            viewport.scroll_x,
            viewport.width,
            viewport.sticky_width,
        ),
        top: axis_target(
            cell.top,
            cell.bottom,
            viewport.scroll_y,
            viewport.height,
            viewport.sticky_height,
        ),
    }
}

fn axis_target(lead: f32, trail: f32, scroll: f32, visible: f32, sticky: f32) -> f32 {
    if lead < scroll + sticky {
        (lead - sticky).max(0.0)
    } else if trail > scroll + visible {
        (trail - visible).max(0.0)
    } else {
        scroll
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn cell(left: f32, top: f32) -> CellBox {
        CellBox {
            left,
            right: left + 64.0,
            top,
            bottom: top + 20.0,
        }
    }

    #[test]
    fn test_visible_cell_keeps_scroll() {
        let vp = Viewport::new(400.0, 300.0)
            .with_sticky(40.0, 20.0)
            .with_scroll(100.0, 50.0);
        let target = scroll_target(&cell(200.0, 100.0), &vp);
        assert_eq!(target, vp.offset());
    }

    #[test]
    fn test_cell_behind_sticky_band() {
        let vp = Viewport::new(400.0, 300.0)
            .with_sticky(40.0, 20.0)
            .with_scroll(100.0, 50.0);
        // Leading edge at 120 < 100 + 40
        let target = scroll_target(&cell(120.0, 60.0), &vp);
        assert_eq!(target.left, 80.0);
        assert_eq!(target.top, 40.0);
    }

    #[test]
    fn test_cell_past_trailing_edge() {
        let vp = Viewport::new(400.0, 300.0).with_sticky(40.0, 20.0);
        let target = scroll_target(&cell(380.0, 290.0), &vp);
        assert_eq!(target.left, 44.0);
        assert_eq!(target.top, 10.0);
    }

    #[test]
    fn test_never_negative() {
        let vp = Viewport::new(400.0, 300.0)
            .with_sticky(40.0, 20.0)
            .with_scroll(30.0, 30.0);
        let target = scroll_target(&cell(10.0, 10.0), &vp);
        assert_eq!(target, ScrollOffset { left: 0.0, top: 0.0 });
    }

    #[test]
    fn test_result_makes_cell_visible() {
        let mut vp = Viewport::new(400.0, 300.0).with_sticky(40.0, 20.0);
        let c = cell(1000.0, 900.0);
        assert!(!vp.is_fully_visible(&c));
        vp.apply(scroll_target(&c, &vp));
        assert!(vp.is_fully_visible(&c));
    }
}
