//! Cell editing mutations.
//!
//! Applies committed edit text to the cell store.

use crate::error::Result;
use crate::store::CellStore;
use crate::types::Coord;

/// Write committed edit text to `coord`.
///
/// Surrounding whitespace is trimmed. Text that is empty after trimming is
/// stored as `""` (explicitly cleared), never removed. Returns the stored value.
pub(crate) fn apply_cell_edit(store: &mut CellStore, coord: Coord, text: &str) -> Result<String> {
    let value = text.trim().to_string();
    store.set(coord, value.as_str())?;
    Ok(value)
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

    #[test]
    fn test_trims_and_stores() {
        let mut store = CellStore::new(GridSize::new(5, 5), RowLabelOrigin::OneBased);
        let value = apply_cell_edit(&mut store, Coord::new(1, 1), "  42 \n").unwrap();
        assert_eq!(value, "42");
        assert_eq!(store.get(Coord::new(1, 1)).unwrap(), "42");
    }

    #[test]
    fn test_blank_clears() {
        let mut store = CellStore::new(GridSize::new(5, 5), RowLabelOrigin::OneBased);
        apply_cell_edit(&mut store, Coord::new(0, 0), "   ").unwrap();
        assert_eq!(store.stored(Coord::new(0, 0)), Some(""));
        assert_eq!(store.get(Coord::new(0, 0)).unwrap(), "");
    }
}
