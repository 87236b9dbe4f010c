use serde::{Deserialize, Serialize};

use super::Coord;

/// A rectangle of cells collapsed to a single owner for display and lookup.
///
/// The owner is always the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRegion {
    pub top_left: Coord,
    pub bottom_right: Coord,
}

impl MergeRegion {
    /// Build a region from two corners in any order.
    pub fn from_corners(a: Coord, b: Coord) -> Self {
        Self {
            top_left: Coord::new(a.row.min(b.row), a.col.min(b.col)),
            bottom_right: Coord::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn owner(&self) -> Coord {
        self.top_left
    }

    pub fn contains(&self, coord: Coord) -> bool {
        (self.top_left.row..=self.bottom_right.row).contains(&coord.row)
            && (self.top_left.col..=self.bottom_right.col).contains(&coord.col)
    }

    /// True if `coord` is inside the region but is not its owner.
    pub fn absorbs(&self, coord: Coord) -> bool {
        coord != self.top_left && self.contains(coord)
    }

    pub fn overlaps(&self, other: &MergeRegion) -> bool {
        self.top_left.row <= other.bottom_right.row
            && other.top_left.row <= self.bottom_right.row
            && self.top_left.col <= other.bottom_right.col
            && other.top_left.col <= self.bottom_right.col
    }

    pub fn row_span(&self) -> u32 {
        self.bottom_right.row - self.top_left.row + 1
    }

    pub fn col_span(&self) -> u32 {
        self.bottom_right.col - self.top_left.col + 1
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let region = MergeRegion::from_corners(Coord::new(3, 1), Coord::new(1, 4));
        assert_eq!(region.top_left, Coord::new(1, 1));
        assert_eq!(region.bottom_right, Coord::new(3, 4));
        assert_eq!(region.row_span(), 3);
        assert_eq!(region.col_span(), 4);
    }

    #[test]
    fn test_absorbs_excludes_owner() {
        let region = MergeRegion::from_corners(Coord::new(0, 0), Coord::new(1, 1));
        assert!(!region.absorbs(Coord::new(0, 0)));
        assert!(region.absorbs(Coord::new(1, 1)));
        assert!(region.absorbs(Coord::new(0, 1)));
        assert!(!region.absorbs(Coord::new(2, 0)));
    }

    #[test]
    fn test_overlaps() {
        let a = MergeRegion::from_corners(Coord::new(0, 0), Coord::new(2, 2));
        let touching = MergeRegion::from_corners(Coord::new(2, 2), Coord::new(3, 3));
        let disjoint = MergeRegion::from_corners(Coord::new(3, 0), Coord::new(4, 2));
        assert!(a.overlaps(&touching));
        assert!(touching.overlaps(&a));
        assert!(!a.overlaps(&disjoint));
    }
}
