//! Merged region bookkeeping.
//!
//! Every tracked region owns its top-left cell. Any other coordinate inside it
//! is absorbed and resolves to that owner. Regions never overlap.

use std::collections::{BTreeSet, HashMap};

use crate::error::{GridError, Result};
use crate::types::{Coord, GridSize, MergeRegion};

#[derive(Debug, Clone)]
pub struct MergeRegionTracker {
    size: GridSize,
    regions: Vec<MergeRegion>,
    /// Region index by every covered coordinate (owner included)
    lookup: HashMap<Coord, usize>,
}

impl MergeRegionTracker {
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            regions: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Merge the bounding rectangle of `coords`.
    ///
    /// The input doesn't need to be contiguous: any scattered set is bounded
    /// by its min/max row and column. Duplicates count once.
    ///
    /// # Errors
    /// - `TooFewCells` if fewer than two distinct coordinates are given
    /// - `OutOfBounds` if any coordinate is outside the grid
    /// - `OverlapConflict` if the rectangle intersects a tracked region
    ///
    /// No region is registered on error.
    pub fn merge<I>(&mut self, coords: I) -> Result<MergeRegion>
    where
        I: IntoIterator<Item = Coord>,
    {
        let coords: BTreeSet<Coord> = coords.into_iter().collect();
        if coords.len() < 2 {
            return Err(GridError::TooFewCells {
                count: coords.len(),
            });
        }
        if let Some(&coord) = coords.iter().find(|c| !self.size.contains(**c)) {
            return Err(GridError::OutOfBounds {
                coord,
                size: self.size,
            });
        }

        let (mut min_row, mut min_col) = (u32::MAX, u32::MAX);
        let (mut max_row, mut max_col) = (0, 0);
        for coord in &coords {
            min_row = min_row.min(coord.row);
            max_row = max_row.max(coord.row);
            min_col = min_col.min(coord.col);
            max_col = max_col.max(coord.col);
        }
        let region = MergeRegion {
            top_left: Coord::new(min_row, min_col),
            bottom_right: Coord::new(max_row, max_col),
        };

        if let Some(existing) = self.regions.iter().find(|r| r.overlaps(&region)) {
            tracing::warn!(
                requested = ?region,
                existing = ?existing,
                "merge rejected: overlaps existing region"
            );
            return Err(GridError::OverlapConflict {
                requested: region,
                existing: *existing,
            });
        }

        let index = self.regions.len();
        self.regions.push(region);
        for row in region.top_left.row..=region.bottom_right.row {
            for col in region.top_left.col..=region.bottom_right.col {
                self.lookup.insert(Coord::new(row, col), index);
            }
        }
        tracing::debug!(
            owner = %region.owner(),
            rows = region.row_span(),
            cols = region.col_span(),
            "merge region registered"
        );
        Ok(region)
    }

    /// The owner of the region absorbing `coord`, or `coord` itself.
    pub fn resolve(&self, coord: Coord) -> Coord {
        self.region_for(coord)
            .map_or(coord, |region| region.owner())
    }

    /// The region covering `coord`, owner included.
    pub fn region_for(&self, coord: Coord) -> Option<&MergeRegion> {
        self.lookup
            .get(&coord)
            .and_then(|&index| self.regions.get(index))
    }

    /// True if `coord` is covered by a region and isn't its owner.
    pub fn is_absorbed(&self, coord: Coord) -> bool {
        self.region_for(coord)
            .is_some_and(|region| region.absorbs(coord))
    }

    /// Regions in registration order.
    pub fn regions(&self) -> &[MergeRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
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

    fn tracker() -> MergeRegionTracker {
        MergeRegionTracker::new(GridSize::new(20, 10))
    }

    #[test]
    fn test_merge_square() {
        let mut merges = tracker();
        let region = merges
            .merge([
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(1, 1),
            ])
            .unwrap();
        assert_eq!(region.owner(), Coord::new(0, 0));
        assert_eq!(merges.resolve(Coord::new(1, 1)), Coord::new(0, 0));
        assert_eq!(merges.resolve(Coord::new(0, 0)), Coord::new(0, 0));
        assert_eq!(merges.resolve(Coord::new(2, 2)), Coord::new(2, 2));
        assert!(merges.is_absorbed(Coord::new(1, 0)));
        assert!(!merges.is_absorbed(Coord::new(0, 0)));
    }

    #[test]
    fn test_too_few_cells() {
        let mut merges = tracker();
        assert!(matches!(
            merges.merge([Coord::new(3, 3)]),
            Err(GridError::TooFewCells { count: 1 })
        ));
        assert!(matches!(
            merges.merge([Coord::new(3, 3), Coord::new(3, 3)]),
            Err(GridError::TooFewCells { count: 1 })
        ));
        assert!(merges.is_empty());
    }

    #[test]
    fn test_overlap_rejected_without_mutation() {
        let mut merges = tracker();
        merges.merge([Coord::new(0, 0), Coord::new(2, 2)]).unwrap();
        let err = merges
            .merge([Coord::new(2, 2), Coord::new(4, 4)])
            .unwrap_err();
        assert!(matches!(err, GridError::OverlapConflict { .. }));
        assert_eq!(merges.len(), 1);
        assert_eq!(merges.resolve(Coord::new(4, 4)), Coord::new(4, 4));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut merges = tracker();
        assert!(matches!(
            merges.merge([Coord::new(0, 0), Coord::new(20, 0)]),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(merges.is_empty());
    }
}
