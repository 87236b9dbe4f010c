//! Active cell and selected set.
//!
//! Two selection styles coexist: toggling individual cells in and out of the
//! set, and dragging a rectangular range. The active (focused) cell is
//! tracked separately; a cell can be active without being selected and the
//! other way around.

use std::collections::BTreeSet;

use crate::types::{Coord, MergeRegion, SelectionRange};

#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    active: Option<Coord>,
    toggled: BTreeSet<Coord>,
    range: Option<SelectionRange>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `coord` the single active cell, returning the one it replaced.
    pub fn set_active(&mut self, coord: Coord) -> Option<Coord> {
        self.active.replace(coord)
    }

    pub fn active(&self) -> Option<Coord> {
        self.active
    }

    pub fn is_active(&self, coord: Coord) -> bool {
        self.active == Some(coord)
    }

    /// Add `coord` to the selected set, or remove it if already selected.
    ///
    /// If `coord` is covered by the current range, the range is first folded
    /// into the toggled set so the rest of it stays selected.
    /// Returns whether `coord` is selected afterwards.
    pub fn toggle_select(&mut self, coord: Coord) -> bool {
        if let Some(range) = self.range.take() {
            if range.contains(coord) {
                self.toggled.extend(range.cells());
            } else {
                self.range = Some(range);
            }
        }
        if self.toggled.remove(&coord) {
            false
        } else {
            self.toggled.insert(coord);
            true
        }
    }

    /// Start a range at `coord`. Replaces any previous selection.
    pub fn begin_range(&mut self, coord: Coord) {
        self.toggled.clear();
        self.range = Some(SelectionRange::single(coord));
    }

    /// Move the range focus to `coord`. Returns false if there is no range
    /// or the focus was already there.
    pub fn extend_range(&mut self, coord: Coord) -> bool {
        match self.range.as_mut() {
            Some(range) if range.focus != coord => {
                range.focus = coord;
                true
            }
            _ => false,
        }
    }

    /// Empty the selected set and drop the range anchor/focus.
    /// The active cell is left alone.
    pub fn clear(&mut self) {
        self.toggled.clear();
        self.range = None;
    }

    /// Replace selected cells absorbed by `region` with its owner.
    ///
    /// A range reaching into the region is folded into the toggled set first.
    pub fn rehome(&mut self, region: &MergeRegion) {
        if let Some(range) = self.range {
            if range.cells().any(|c| region.absorbs(c)) {
                self.range = None;
                self.toggled.extend(range.cells());
            }
        }
        let before = self.toggled.len();
        self.toggled.retain(|c| !region.absorbs(*c));
        if self.toggled.len() != before {
            self.toggled.insert(region.owner());
        }
    }

    pub fn range(&self) -> Option<SelectionRange> {
        self.range
    }

    pub fn is_selected(&self, coord: Coord) -> bool {
        self.toggled.contains(&coord) || self.range.is_some_and(|r| r.contains(coord))
    }

    /// Every selected coordinate, toggled and range-covered, in row-major order.
    pub fn selected(&self) -> BTreeSet<Coord> {
        let mut cells = self.toggled.clone();
        if let Some(range) = self.range {
            cells.extend(range.cells());
        }
        cells
    }

    pub fn is_empty(&self) -> bool {
        self.toggled.is_empty() && self.range.is_none()
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
    fn test_toggle_adds_and_removes() {
        let mut sel = SelectionModel::new();
        assert!(sel.toggle_select(Coord::new(1, 1)));
        assert!(sel.toggle_select(Coord::new(4, 2)));
        assert!(sel.is_selected(Coord::new(1, 1)));
        assert!(!sel.toggle_select(Coord::new(1, 1)));
        assert!(!sel.is_selected(Coord::new(1, 1)));
        assert_eq!(sel.selected().len(), 1);
    }

    #[test]
    fn test_range_replaces_toggled() {
        let mut sel = SelectionModel::new();
        sel.toggle_select(Coord::new(9, 9));
        sel.begin_range(Coord::new(0, 0));
        assert!(!sel.is_selected(Coord::new(9, 9)));
        assert!(sel.extend_range(Coord::new(1, 1)));
        assert!(!sel.extend_range(Coord::new(1, 1)));
        assert_eq!(sel.selected().len(), 4);
    }

    #[test]
    fn test_toggle_inside_range_keeps_rest() {
        let mut sel = SelectionModel::new();
        sel.begin_range(Coord::new(0, 0));
        sel.extend_range(Coord::new(1, 1));
        assert!(!sel.toggle_select(Coord::new(0, 1)));
        assert!(sel.range().is_none());
        let selected: Vec<Coord> = sel.selected().into_iter().collect();
        assert_eq!(
            selected,
            vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(1, 1)]
        );
    }

    #[test]
    fn test_toggle_outside_range_adds() {
        let mut sel = SelectionModel::new();
        sel.begin_range(Coord::new(0, 0));
        assert!(sel.toggle_select(Coord::new(5, 5)));
        assert!(sel.range().is_some());
        assert_eq!(sel.selected().len(), 2);
    }

    #[test]
    fn test_extend_without_range_is_noop() {
        let mut sel = SelectionModel::new();
        assert!(!sel.extend_range(Coord::new(2, 2)));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_active_is_independent_of_selection() {
        let mut sel = SelectionModel::new();
        assert_eq!(sel.set_active(Coord::new(3, 3)), None);
        assert!(sel.is_active(Coord::new(3, 3)));
        assert!(!sel.is_selected(Coord::new(3, 3)));

        sel.toggle_select(Coord::new(3, 3));
        assert_eq!(sel.set_active(Coord::new(0, 0)), Some(Coord::new(3, 3)));
        assert!(!sel.is_active(Coord::new(3, 3)));
        assert!(sel.is_selected(Coord::new(3, 3)));

        sel.clear();
        assert!(sel.is_empty());
        assert_eq!(sel.active(), Some(Coord::new(0, 0)));
    }

    #[test]
    fn test_rehome_folds_absorbed_cells_into_owner() {
        let region = MergeRegion::from_corners(Coord::new(0, 0), Coord::new(1, 1));
        let mut sel = SelectionModel::new();
        sel.toggle_select(Coord::new(1, 1));
        sel.toggle_select(Coord::new(5, 5));
        sel.rehome(&region);
        let selected: Vec<Coord> = sel.selected().into_iter().collect();
        assert_eq!(selected, vec![Coord::new(0, 0), Coord::new(5, 5)]);

        let mut sel = SelectionModel::new();
        sel.begin_range(Coord::new(1, 1));
        sel.extend_range(Coord::new(2, 2));
        sel.rehome(&region);
        assert!(sel.range().is_none());
        assert!(!sel.is_selected(Coord::new(1, 1)));
        assert!(sel.is_selected(Coord::new(0, 0)));
        assert_eq!(sel.selected().len(), 4);
    }

    #[test]
    fn test_rehome_leaves_unrelated_range() {
        let region = MergeRegion::from_corners(Coord::new(0, 0), Coord::new(1, 1));
        let mut sel = SelectionModel::new();
        sel.begin_range(Coord::new(0, 0));
        sel.extend_range(Coord::new(0, 0));
        sel.rehome(&region);
        assert!(sel.range().is_some());
        assert_eq!(sel.selected().len(), 1);
    }
}
