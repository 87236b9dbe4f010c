//! Keyboard focus movement.
//!
//! Plain arrows move one cell; extended arrows (Ctrl/Cmd held) jump to the
//! grid edge. Candidates outside the grid are discarded rather than wrapped
//! or clamped, so the focus simply stays put at a boundary. Focus never lands
//! on an absorbed coordinate: it resolves to the region owner.

mod keys;

pub use keys::{KeyCommand, Modifiers};

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::merge::MergeRegionTracker;
use crate::types::{Coord, GridSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct NavigationEngine {
    size: GridSize,
}

impl NavigationEngine {
    pub fn new(size: GridSize) -> Self {
        Self { size }
    }

    /// Move from the current focus.
    ///
    /// # Errors
    /// Returns `NoActiveCell` if nothing is focused yet. Callers treat that as
    /// a silent no-op.
    pub fn navigate(
        &self,
        active: Option<Coord>,
        direction: Direction,
        extended: bool,
        merges: &MergeRegionTracker,
    ) -> Result<Coord> {
        let current = active.ok_or(GridError::NoActiveCell)?;
        Ok(self.step(current, direction, extended, merges))
    }

    /// Compute the coordinate focus moves to from `current`.
    ///
    /// A plain step out of a merged region starts from the region's far edge
    /// in the direction of travel, so focus can leave the region instead of
    /// resolving straight back to its owner.
    pub fn step(
        &self,
        current: Coord,
        direction: Direction,
        extended: bool,
        merges: &MergeRegionTracker,
    ) -> Coord {
        let current = merges.resolve(current);
        let candidate = if extended {
            Some(self.jump(current, direction))
        } else {
            let origin = merges.region_for(current).map_or(current, |region| {
                match direction {
                    Direction::Up | Direction::Left => region.top_left,
                    Direction::Down | Direction::Right => region.bottom_right,
                }
            });
            let next = match direction {
                Direction::Up => origin.row.checked_sub(1).map(|row| Coord::new(row, current.col)),
                Direction::Down => origin.row.checked_add(1).map(|row| Coord::new(row, current.col)),
                Direction::Left => origin.col.checked_sub(1).map(|col| Coord::new(current.row, col)),
                Direction::Right => origin.col.checked_add(1).map(|col| Coord::new(current.row, col)),
            };
            next.filter(|c| self.size.contains(*c))
        };

        let Some(candidate) = candidate else {
            tracing::trace!(%current, ?direction, "move discarded at grid boundary");
            return current;
        };
        merges.resolve(candidate)
    }

    fn jump(&self, current: Coord, direction: Direction) -> Coord {
        match direction {
            Direction::Up => Coord::new(0, current.col),
            Direction::Down => Coord::new(self.size.last_row(), current.col),
            Direction::Left => Coord::new(current.row, 0),
            Direction::Right => Coord::new(current.row, self.size.last_col()),
        }
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

    fn nav() -> (NavigationEngine, MergeRegionTracker) {
        let size = GridSize::new(10, 8);
        (NavigationEngine::new(size), MergeRegionTracker::new(size))
    }

    #[test]
    fn test_plain_steps() {
        let (nav, merges) = nav();
        let c = Coord::new(4, 4);
        assert_eq!(nav.step(c, Direction::Up, false, &merges), Coord::new(3, 4));
        assert_eq!(nav.step(c, Direction::Down, false, &merges), Coord::new(5, 4));
        assert_eq!(nav.step(c, Direction::Left, false, &merges), Coord::new(4, 3));
        assert_eq!(nav.step(c, Direction::Right, false, &merges), Coord::new(4, 5));
    }

    #[test]
    fn test_boundary_discards() {
        let (nav, merges) = nav();
        assert_eq!(
            nav.step(Coord::new(0, 0), Direction::Up, false, &merges),
            Coord::new(0, 0)
        );
        assert_eq!(
            nav.step(Coord::new(9, 7), Direction::Right, false, &merges),
            Coord::new(9, 7)
        );
    }

    #[test]
    fn test_jumps() {
        let (nav, merges) = nav();
        let c = Coord::new(4, 4);
        assert_eq!(nav.step(c, Direction::Up, true, &merges), Coord::new(0, 4));
        assert_eq!(nav.step(c, Direction::Down, true, &merges), Coord::new(9, 4));
        assert_eq!(nav.step(c, Direction::Left, true, &merges), Coord::new(4, 0));
        assert_eq!(nav.step(c, Direction::Right, true, &merges), Coord::new(4, 7));
    }

    #[test]
    fn test_no_active_cell() {
        let (nav, merges) = nav();
        assert!(matches!(
            nav.navigate(None, Direction::Down, false, &merges),
            Err(GridError::NoActiveCell)
        ));
    }

    #[test]
    fn test_landing_in_merge_resolves_to_owner() {
        let (nav, mut merges) = nav();
        merges.merge([Coord::new(2, 2), Coord::new(3, 3)]).unwrap();
        // Moving up from below the region lands on (3, 3), which is absorbed
        assert_eq!(
            nav.step(Coord::new(4, 3), Direction::Up, false, &merges),
            Coord::new(2, 2)
        );
        assert_eq!(
            nav.step(Coord::new(3, 4), Direction::Left, false, &merges),
            Coord::new(2, 2)
        );
    }

    #[test]
    fn test_leaving_merge_from_far_edge() {
        let (nav, mut merges) = nav();
        merges.merge([Coord::new(2, 2), Coord::new(3, 3)]).unwrap();
        assert_eq!(
            nav.step(Coord::new(2, 2), Direction::Down, false, &merges),
            Coord::new(4, 2)
        );
        assert_eq!(
            nav.step(Coord::new(2, 2), Direction::Right, false, &merges),
            Coord::new(2, 4)
        );
        assert_eq!(
            nav.step(Coord::new(2, 2), Direction::Up, false, &merges),
            Coord::new(1, 2)
        );
    }
}
