//! Two-phase drag gesture that exchanges two cells' values.
//!
//! `pick_up` records the source, `drop` swaps it with the target through the
//! store and clears the pick-up, `cancel` clears it without touching the store.
//! Only a coordinate travels with the gesture.

use crate::error::Result;
use crate::store::CellStore;
use crate::types::{Coord, MergeRegion};

#[derive(Debug, Clone, Default)]
pub struct DragSwapController {
    source: Option<Coord>,
    /// Cell the pointer is currently dragging over, for drop-target highlight
    hover: Option<Coord>,
}

impl DragSwapController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `coord` as the drag source.
    ///
    /// Idempotent while a pick-up is outstanding: the first source wins.
    /// Returns the source in effect.
    pub fn pick_up(&mut self, coord: Coord) -> Coord {
        *self.source.get_or_insert(coord)
    }

    pub fn source(&self) -> Option<Coord> {
        self.source
    }

    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }

    /// Track the current drop target. Ignored when nothing is picked up.
    pub fn drag_over(&mut self, coord: Coord) {
        if self.source.is_some() {
            self.hover = Some(coord);
        }
    }

    pub fn hover(&self) -> Option<Coord> {
        self.hover
    }

    /// Swap the picked-up cell with `target` and clear the pick-up.
    ///
    /// Returns the swapped pair, or `None` if nothing was picked up. Dropping
    /// onto the source itself leaves the value unchanged.
    ///
    /// # Errors
    /// Returns `OutOfBounds` from the store. The pick-up is still cleared.
    pub fn drop(&mut self, target: Coord, store: &mut CellStore) -> Result<Option<(Coord, Coord)>> {
        self.hover = None;
        let Some(source) = self.source.take() else {
            return Ok(None);
        };
        store.swap(source, target)?;
        tracing::debug!(%source, %target, "cells swapped");
        Ok(Some((source, target)))
    }

    /// Move a source or hover cell absorbed by `region` onto its owner.
    pub fn rehome(&mut self, region: &MergeRegion) {
        for slot in [&mut self.source, &mut self.hover] {
            if let Some(coord) = slot.filter(|c| region.absorbs(*c)) {
                tracing::debug!(%coord, owner = %region.owner(), "drag cell absorbed by merge");
                *slot = Some(region.owner());
            }
        }
    }

    /// Abandon the gesture without mutating anything.
    pub fn cancel(&mut self) -> Option<Coord> {
        self.hover = None;
        self.source.take()
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
    use crate::cell_ref::RowLabelOrigin;
    use crate::types::GridSize;

    fn store() -> CellStore {
        CellStore::new(GridSize::new(20, 10), RowLabelOrigin::OneBased)
    }

    #[test]
    fn test_pick_up_is_idempotent() {
        let mut drag = DragSwapController::new();
        assert_eq!(drag.pick_up(Coord::new(1, 2)), Coord::new(1, 2));
        assert_eq!(drag.pick_up(Coord::new(5, 5)), Coord::new(1, 2));
        assert_eq!(drag.source(), Some(Coord::new(1, 2)));
    }

    #[test]
    fn test_drop_swaps_and_clears() {
        let mut store = store();
        store.set(Coord::new(0, 0), "moved").unwrap();
        let mut drag = DragSwapController::new();
        drag.pick_up(Coord::new(0, 0));
        drag.drag_over(Coord::new(3, 1));
        assert_eq!(drag.hover(), Some(Coord::new(3, 1)));
        let swapped = drag.drop(Coord::new(3, 1), &mut store).unwrap();
        assert_eq!(swapped, Some((Coord::new(0, 0), Coord::new(3, 1))));
        assert_eq!(store.get(Coord::new(3, 1)).unwrap(), "moved");
        assert_eq!(store.get(Coord::new(0, 0)).unwrap(), "B4");
        assert!(!drag.is_active());
        assert_eq!(drag.hover(), None);
    }

    #[test]
    fn test_drop_on_source_is_noop() {
        let mut store = store();
        let mut drag = DragSwapController::new();
        drag.pick_up(Coord::new(1, 2));
        drag.drop(Coord::new(1, 2), &mut store).unwrap();
        assert_eq!(store.get(Coord::new(1, 2)).unwrap(), "C2");
    }

    #[test]
    fn test_cancel_leaves_store() {
        let mut store = store();
        let mut drag = DragSwapController::new();
        drag.pick_up(Coord::new(1, 2));
        assert_eq!(drag.cancel(), Some(Coord::new(1, 2)));
        assert_eq!(drag.drop(Coord::new(4, 4), &mut store).unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_rehome_moves_absorbed_cells_to_owner() {
        let region = MergeRegion::from_corners(Coord::new(0, 0), Coord::new(1, 1));
        let mut drag = DragSwapController::new();
        drag.pick_up(Coord::new(1, 1));
        drag.drag_over(Coord::new(0, 1));
        drag.rehome(&region);
        assert_eq!(drag.source(), Some(Coord::new(0, 0)));
        assert_eq!(drag.hover(), Some(Coord::new(0, 0)));

        let mut drag = DragSwapController::new();
        drag.pick_up(Coord::new(4, 4));
        drag.rehome(&region);
        assert_eq!(drag.source(), Some(Coord::new(4, 4)));
    }

    #[test]
    fn test_drag_over_without_pick_up() {
        let mut drag = DragSwapController::new();
        drag.drag_over(Coord::new(2, 2));
        assert_eq!(drag.hover(), None);
    }
}
