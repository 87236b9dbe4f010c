//! Track sizes and cell positions for a grid.
//!
//! Positions are cumulative so hit testing is O(log n). All boxes are in
//! scrolled-content coordinates: column 0 starts right after the sticky
//! row-label band and row 0 right after the sticky column-letter band.

use serde::Serialize;

use crate::config::GridConfig;
use crate::types::{Coord, GridSize, MergeRegion};

/// Pixel box of a cell, or of a whole region for a merge owner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellBox {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl CellBox {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Pre-computed geometry for a grid
#[derive(Debug, Clone)]
pub struct SheetLayout {
    /// Cumulative column positions (`col_positions[i]` = x of column i's left edge,
    /// relative to the end of the row-label band). One extra trailing edge.
    col_positions: Vec<f32>,
    /// Cumulative row positions, same scheme as columns.
    row_positions: Vec<f32>,
    col_widths: Vec<f32>,
    row_heights: Vec<f32>,
    min_col_width: f32,
    min_row_height: f32,
    /// Width of the sticky row-label band
    pub row_header_width: f32,
    /// Height of the sticky column-letter band
    pub col_header_height: f32,
}

fn cumulative(sizes: &[f32]) -> Vec<f32> {
    let mut positions = Vec::with_capacity(sizes.len() + 1);
    let mut edge: f32 = 0.0;
    for size in sizes {
        positions.push(edge);
        edge += size;
    }
    positions.push(edge); // Final edge
    positions
}

/// Index of the track containing `pos`, `None` outside `[0, total)`.
fn track_at(positions: &[f32], pos: f32) -> Option<u32> {
    let total = positions.last().copied()?;
    if !(0.0..total).contains(&pos) {
        return None;
    }
    let index = match positions
        .binary_search_by(|edge| edge.partial_cmp(&pos).unwrap_or(std::cmp::Ordering::Equal))
    {
        Ok(i) => i,
        Err(i) => i.saturating_sub(1),
    };
    u32::try_from(index).ok()
}

impl SheetLayout {
    /// Build a layout with every track at its configured default size.
    pub fn new(config: &GridConfig) -> Self {
        let col_widths = vec![config.default_col_width; config.cols as usize];
        let row_heights = vec![config.default_row_height; config.rows as usize];
        Self {
            col_positions: cumulative(&col_widths),
            row_positions: cumulative(&row_heights),
            col_widths,
            row_heights,
            min_col_width: config.min_col_width,
            min_row_height: config.min_row_height,
            row_header_width: config.row_header_width,
            col_header_height: config.col_header_height,
        }
    }

    pub fn size(&self) -> GridSize {
        GridSize::new(
            u32::try_from(self.row_heights.len()).unwrap_or(u32::MAX),
            u32::try_from(self.col_widths.len()).unwrap_or(u32::MAX),
        )
    }

    pub fn col_width(&self, col: u32) -> Option<f32> {
        self.col_widths.get(col as usize).copied()
    }

    pub fn row_height(&self, row: u32) -> Option<f32> {
        self.row_heights.get(row as usize).copied()
    }

    /// Set a column's width.
    ///
    /// Ignored (returns false) unless `width` is strictly wider than the
    /// minimum and `col` exists.
    pub fn resize_column(&mut self, col: u32, width: f32) -> bool {
        if !(width > self.min_col_width && width.is_finite()) {
            return false;
        }
        let Some(slot) = self.col_widths.get_mut(col as usize) else {
            return false;
        };
        *slot = width;
        self.col_positions = cumulative(&self.col_widths);
        true
    }

    /// Set a row's height. Same rules as [`Self::resize_column`].
    pub fn resize_row(&mut self, row: u32, height: f32) -> bool {
        if !(height > self.min_row_height && height.is_finite()) {
            return false;
        }
        let Some(slot) = self.row_heights.get_mut(row as usize) else {
            return false;
        };
        *slot = height;
        self.row_positions = cumulative(&self.row_heights);
        true
    }

    /// Pixel box of `coord`, spanning all of `region` when given.
    ///
    /// Pass the region that covers `coord` (if any); absorbed coordinates get
    /// the owner's box. Returns `None` if `coord` is outside the grid.
    pub fn cell_box(&self, coord: Coord, region: Option<&MergeRegion>) -> Option<CellBox> {
        let (first, last) = match region {
            Some(region) if region.contains(coord) => (region.top_left, region.bottom_right),
            _ => (coord, coord),
        };
        let left = self.col_positions.get(first.col as usize).copied()?;
        let right = self.col_positions.get(last.col as usize + 1).copied()?;
        let top = self.row_positions.get(first.row as usize).copied()?;
        let bottom = self.row_positions.get(last.row as usize + 1).copied()?;
        Some(CellBox {
            left: left + self.row_header_width,
            right: right + self.row_header_width,
            top: top + self.col_header_height,
            bottom: bottom + self.col_header_height,
        })
    }

    /// Find the column under a content x position (binary search).
    pub fn col_at_x(&self, x: f32) -> Option<u32> {
        track_at(&self.col_positions, x - self.row_header_width)
    }

    /// Find the row under a content y position (binary search).
    pub fn row_at_y(&self, y: f32) -> Option<u32> {
        track_at(&self.row_positions, y - self.col_header_height)
    }

    /// Hit-test a content point. Points over the header bands miss.
    pub fn cell_at_point(&self, x: f32, y: f32) -> Option<Coord> {
        Some(Coord::new(self.row_at_y(y)?, self.col_at_x(x)?))
    }

    /// Total content width, header band included
    pub fn total_width(&self) -> f32 {
        self.col_positions.last().copied().unwrap_or(0.0) + self.row_header_width
    }

    /// Total content height, header band included
    pub fn total_height(&self) -> f32 {
        self.row_positions.last().copied().unwrap_or(0.0) + self.col_header_height
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
    use crate::config::{DEFAULT_COL_WIDTH, DEFAULT_ROW_HEIGHT};

    fn layout() -> SheetLayout {
        SheetLayout::new(&GridConfig::with_size(10, 5))
    }

    #[test]
    fn test_basic_layout() {
        let layout = layout();
        assert_eq!(layout.size(), GridSize::new(10, 5));
        assert_eq!(layout.total_width(), DEFAULT_COL_WIDTH * 5.0 + 40.0);
        assert_eq!(layout.total_height(), DEFAULT_ROW_HEIGHT * 10.0 + 20.0);
    }

    #[test]
    fn test_cell_box_includes_headers() {
        let layout = layout();
        let b = layout.cell_box(Coord::new(0, 0), None).unwrap();
        assert_eq!(b.left, 40.0);
        assert_eq!(b.top, 20.0);
        assert_eq!(b.width(), DEFAULT_COL_WIDTH);
        assert_eq!(b.height(), DEFAULT_ROW_HEIGHT);

        let b = layout.cell_box(Coord::new(1, 2), None).unwrap();
        assert_eq!(b.left, 40.0 + DEFAULT_COL_WIDTH * 2.0);
        assert_eq!(b.top, 20.0 + DEFAULT_ROW_HEIGHT);

        assert!(layout.cell_box(Coord::new(10, 0), None).is_none());
    }

    #[test]
    fn test_merged_box_spans_region() {
        let layout = layout();
        let region = MergeRegion::from_corners(Coord::new(0, 0), Coord::new(1, 1));
        let owner = layout.cell_box(Coord::new(0, 0), Some(&region)).unwrap();
        assert_eq!(owner.width(), DEFAULT_COL_WIDTH * 2.0);
        assert_eq!(owner.height(), DEFAULT_ROW_HEIGHT * 2.0);
        let absorbed = layout.cell_box(Coord::new(1, 1), Some(&region)).unwrap();
        assert_eq!(owner, absorbed);
    }

    #[test]
    fn test_resize_respects_minimum() {
        let mut layout = layout();
        assert!(!layout.resize_column(0, 50.0));
        assert!(!layout.resize_column(0, 12.0));
        assert!(layout.resize_column(0, 50.5));
        assert_eq!(layout.col_width(0), Some(50.5));
        assert!(!layout.resize_column(5, 100.0));

        assert!(!layout.resize_row(3, 20.0));
        assert!(layout.resize_row(3, 35.0));
        let b = layout.cell_box(Coord::new(4, 0), None).unwrap();
        assert_eq!(b.top, 20.0 + DEFAULT_ROW_HEIGHT * 3.0 + 35.0);
    }

    #[test]
    fn test_resize_grows_merged_box() {
        let mut layout = layout();
        let region = MergeRegion::from_corners(Coord::new(0, 0), Coord::new(0, 2));
        layout.resize_column(1, 100.0);
        let b = layout.cell_box(Coord::new(0, 0), Some(&region)).unwrap();
        assert_eq!(b.width(), DEFAULT_COL_WIDTH * 2.0 + 100.0);
    }

    #[test]
    fn test_hit_testing() {
        let layout = layout();
        assert_eq!(layout.cell_at_point(40.0, 20.0), Some(Coord::new(0, 0)));
        assert_eq!(layout.cell_at_point(40.0 + 70.0, 20.0 + 45.0), Some(Coord::new(2, 1)));
        // Over the header bands
        assert_eq!(layout.cell_at_point(10.0, 30.0), None);
        assert_eq!(layout.cell_at_point(50.0, 5.0), None);
        // Past the last column
        assert_eq!(layout.col_at_x(40.0 + DEFAULT_COL_WIDTH * 5.0), None);
    }
}
