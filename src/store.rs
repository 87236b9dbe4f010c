//! Sparse cell value storage.
//!
//! A missing entry means "never written" and reads back as the default label.
//! An entry holding `""` means "explicitly cleared" and reads back empty.
//! Entries are never removed.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::cell_ref::{default_label, RowLabelOrigin};
use crate::error::{GridError, Result};
use crate::types::{Coord, GridSize};

#[derive(Debug, Clone)]
pub struct CellStore {
    size: GridSize,
    origin: RowLabelOrigin,
    values: HashMap<Coord, String>,
}

impl CellStore {
    pub fn new(size: GridSize, origin: RowLabelOrigin) -> Self {
        Self {
            size,
            origin,
            values: HashMap::new(),
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    fn check(&self, coord: Coord) -> Result<()> {
        if self.size.contains(coord) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                coord,
                size: self.size,
            })
        }
    }

    /// Stored value, or the default label if the cell was never written.
    ///
    /// # Errors
    /// Returns `OutOfBounds` if `coord` is outside the grid.
    pub fn get(&self, coord: Coord) -> Result<Cow<'_, str>> {
        self.check(coord)?;
        Ok(match self.values.get(&coord) {
            Some(value) => Cow::Borrowed(value.as_str()),
            None => Cow::Owned(default_label(coord, self.origin)),
        })
    }

    /// The stored value only, `None` if never written.
    pub fn stored(&self, coord: Coord) -> Option<&str> {
        self.values.get(&coord).map(String::as_str)
    }

    /// Overwrite the value at `coord` unconditionally.
    ///
    /// # Errors
    /// Returns `OutOfBounds` if `coord` is outside the grid.
    pub fn set(&mut self, coord: Coord, value: impl Into<String>) -> Result<()> {
        self.check(coord)?;
        self.values.insert(coord, value.into());
        Ok(())
    }

    /// Exchange the values of two cells.
    ///
    /// A never-written cell contributes its default label, so after the swap
    /// both cells hold explicit entries. Swapping a cell with itself is a no-op.
    ///
    /// # Errors
    /// Returns `OutOfBounds` if either coordinate is outside the grid. Nothing
    /// is mutated in that case.
    pub fn swap(&mut self, a: Coord, b: Coord) -> Result<()> {
        self.check(a)?;
        self.check(b)?;
        if a == b {
            return Ok(());
        }
        let value_a = self.get(a)?.into_owned();
        let value_b = self.get(b)?.into_owned();
        self.values.insert(a, value_b);
        self.values.insert(b, value_a);
        Ok(())
    }

    /// Number of cells with an explicit entry.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Explicit entries in row-major order.
    pub fn entries(&self) -> Vec<(Coord, &str)> {
        let mut entries: Vec<(Coord, &str)> = self
            .values
            .iter()
            .map(|(coord, value)| (*coord, value.as_str()))
            .collect();
        entries.sort_by_key(|(coord, _)| *coord);
        entries
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

    fn store() -> CellStore {
        CellStore::new(GridSize::new(40, 30), RowLabelOrigin::OneBased)
    }

    #[test]
    fn test_default_label_until_written() {
        let mut store = store();
        assert_eq!(store.get(Coord::new(0, 0)).unwrap(), "A1");
        assert_eq!(store.stored(Coord::new(0, 0)), None);

        store.set(Coord::new(0, 0), "hi").unwrap();
        assert_eq!(store.get(Coord::new(0, 0)).unwrap(), "hi");
    }

    #[test]
    fn test_cleared_is_not_default() {
        let mut store = store();
        store.set(Coord::new(2, 1), "").unwrap();
        assert_eq!(store.get(Coord::new(2, 1)).unwrap(), "");
        assert_eq!(store.stored(Coord::new(2, 1)), Some(""));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_swap_transfers_default_labels() {
        let mut store = store();
        store.set(Coord::new(0, 0), "x").unwrap();
        store.swap(Coord::new(0, 0), Coord::new(1, 2)).unwrap();
        assert_eq!(store.get(Coord::new(0, 0)).unwrap(), "C2");
        assert_eq!(store.get(Coord::new(1, 2)).unwrap(), "x");
        assert_eq!(store.stored(Coord::new(0, 0)), Some("C2"));
    }

    #[test]
    fn test_swap_is_involution() {
        let mut store = store();
        store.set(Coord::new(3, 3), "left").unwrap();
        let a = Coord::new(3, 3);
        let b = Coord::new(7, 9);
        let before = (store.get(a).unwrap().into_owned(), store.get(b).unwrap().into_owned());
        store.swap(a, b).unwrap();
        store.swap(a, b).unwrap();
        let after = (store.get(a).unwrap().into_owned(), store.get(b).unwrap().into_owned());
        assert_eq!(before, after);
    }

    #[test]
    fn test_swap_same_cell_is_noop() {
        let mut store = store();
        store.swap(Coord::new(1, 2), Coord::new(1, 2)).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.get(Coord::new(1, 2)).unwrap(), "C2");
    }

    #[test]
    fn test_out_of_bounds() {
        let mut store = store();
        assert!(matches!(
            store.get(Coord::new(40, 0)),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(store.set(Coord::new(0, 30), "x").is_err());
        assert!(store.swap(Coord::new(0, 0), Coord::new(99, 99)).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_entries_sorted() {
        let mut store = store();
        store.set(Coord::new(5, 0), "b").unwrap();
        store.set(Coord::new(0, 4), "a").unwrap();
        let entries = store.entries();
        assert_eq!(entries, vec![(Coord::new(0, 4), "a"), (Coord::new(5, 0), "b")]);
    }
}
