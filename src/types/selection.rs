use serde::{Deserialize, Serialize};

use super::Coord;

/// A drag-range selection: the cell where the gesture started and the cell
/// it currently reaches.
///
/// The covered set is the normalized rectangle between the two, so the drag
/// direction never changes which cells are covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub anchor: Coord,
    pub focus: Coord,
}

impl SelectionRange {
    /// A range covering exactly one cell.
    pub fn single(coord: Coord) -> Self {
        Self {
            anchor: coord,
            focus: coord,
        }
    }

    /// Get normalized bounds as `(top_left, bottom_right)`.
    pub fn bounds(&self) -> (Coord, Coord) {
        (
            Coord::new(
                self.anchor.row.min(self.focus.row),
                self.anchor.col.min(self.focus.col),
            ),
            Coord::new(
                self.anchor.row.max(self.focus.row),
                self.anchor.col.max(self.focus.col),
            ),
        )
    }

    pub fn contains(&self, coord: Coord) -> bool {
        let (tl, br) = self.bounds();
        (tl.row..=br.row).contains(&coord.row) && (tl.col..=br.col).contains(&coord.col)
    }

    /// Iterate the covered set in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let (tl, br) = self.bounds();
        (tl.row..=br.row).flat_map(move |row| (tl.col..=br.col).map(move |col| Coord::new(row, col)))
    }

    /// Number of covered cells.
    pub fn len(&self) -> u64 {
        let (tl, br) = self.bounds();
        u64::from(br.row - tl.row + 1) * u64::from(br.col - tl.col + 1)
    }

    /// A range always covers at least its anchor.
    pub fn is_empty(&self) -> bool {
        false
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
    fn test_bounds_are_direction_independent() {
        let forward = SelectionRange {
            anchor: Coord::new(2, 2),
            focus: Coord::new(5, 5),
        };
        let backward = SelectionRange {
            anchor: Coord::new(5, 5),
            focus: Coord::new(2, 2),
        };
        assert_eq!(forward.bounds(), backward.bounds());
        assert_eq!(
            forward.cells().collect::<Vec<_>>(),
            backward.cells().collect::<Vec<_>>()
        );
        assert_eq!(forward.len(), 16);
    }

    #[test]
    fn test_mixed_direction() {
        // Drag up and to the right
        let range = SelectionRange {
            anchor: Coord::new(4, 1),
            focus: Coord::new(1, 3),
        };
        assert_eq!(range.bounds(), (Coord::new(1, 1), Coord::new(4, 3)));
        assert!(range.contains(Coord::new(2, 2)));
        assert!(!range.contains(Coord::new(0, 2)));
        assert!(!range.contains(Coord::new(2, 4)));
    }

    #[test]
    fn test_single() {
        let range = SelectionRange::single(Coord::new(7, 3));
        assert_eq!(range.len(), 1);
        assert_eq!(range.cells().collect::<Vec<_>>(), vec![Coord::new(7, 3)]);
    }
}
