//! Drag-swap tests: pick-up/drop protocol, the involution law and gesture
//! exclusivity.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{assert_label, c, engine};
use sheetgrid::engine::GestureMode;
use sheetgrid::store::CellStore;
use sheetgrid::{GridError, GridSize, RowLabelOrigin};

// ============================================================================
// STORE SWAP
// ============================================================================

#[test]
fn test_swap_twice_restores() {
    let mut store = CellStore::new(GridSize::new(10, 10), RowLabelOrigin::OneBased);
    store.set(c(0, 0), "left").unwrap();
    store.set(c(4, 4), "right").unwrap();

    store.swap(c(0, 0), c(4, 4)).unwrap();
    assert_eq!(store.get(c(0, 0)).unwrap(), "right");
    assert_eq!(store.get(c(4, 4)).unwrap(), "left");

    store.swap(c(0, 0), c(4, 4)).unwrap();
    assert_eq!(store.get(c(0, 0)).unwrap(), "left");
    assert_eq!(store.get(c(4, 4)).unwrap(), "right");
}

#[test]
fn test_swap_with_untouched_cell_moves_default_label() {
    let mut store = CellStore::new(GridSize::new(10, 10), RowLabelOrigin::OneBased);
    store.set(c(0, 0), "value").unwrap();
    store.swap(c(0, 0), c(2, 1)).unwrap();
    assert_eq!(store.get(c(0, 0)).unwrap(), "B3");
    assert_eq!(store.get(c(2, 1)).unwrap(), "value");
    assert_eq!(store.len(), 2);
}

#[test]
fn test_swap_out_of_bounds_mutates_nothing() {
    let mut store = CellStore::new(GridSize::new(3, 3), RowLabelOrigin::OneBased);
    store.set(c(0, 0), "kept").unwrap();
    assert!(matches!(
        store.swap(c(0, 0), c(3, 0)),
        Err(GridError::OutOfBounds { .. })
    ));
    assert_eq!(store.get(c(0, 0)).unwrap(), "kept");
    assert_eq!(store.len(), 1);
}

// ============================================================================
// ENGINE GESTURE
// ============================================================================

#[test]
fn test_drag_drop_swaps_labels() {
    let mut engine = engine(10, 10);
    engine.commit_edit(c(1, 2), "dragged").unwrap();
    engine.drag_start(c(1, 2)).unwrap();
    engine.drag_over(c(3, 3)).unwrap();
    engine.drag_over(c(5, 5)).unwrap();
    let swapped = engine.drop(c(5, 5)).unwrap();
    engine.drag_end();

    assert_eq!(swapped, Some((c(1, 2), c(5, 5))));
    assert_label(&engine, c(5, 5), "dragged");
    assert_label(&engine, c(1, 2), "F6");
    assert_eq!(engine.drag_source(), None);
    assert_eq!(engine.drag_hover(), None);
}

#[test]
fn test_drop_on_source_is_unchanged() {
    let mut engine = engine(10, 10);
    engine.drag_start(c(1, 2)).unwrap();
    engine.drop(c(1, 2)).unwrap();
    engine.drag_end();
    assert_label(&engine, c(1, 2), "C2");
}

#[test]
fn test_drag_end_without_drop_cancels() {
    let mut engine = engine(10, 10);
    engine.commit_edit(c(0, 0), "stay").unwrap();
    engine.drag_start(c(0, 0)).unwrap();
    engine.drag_over(c(2, 2)).unwrap();
    engine.drag_end();
    assert_eq!(engine.drop(c(2, 2)).unwrap(), None);
    assert_label(&engine, c(0, 0), "stay");
    assert_label(&engine, c(2, 2), "C3");
}

#[test]
fn test_repeated_drag_start_keeps_first_source() {
    let mut engine = engine(10, 10);
    engine.drag_start(c(0, 0)).unwrap();
    assert_eq!(engine.drag_start(c(4, 4)).unwrap(), c(0, 0));
    assert_eq!(
        engine.gesture(),
        GestureMode::DragSwap { source: c(0, 0) }
    );
}

#[test]
fn test_drag_blocked_during_range_select() {
    let mut engine = engine(10, 10);
    engine.pointer_down(c(0, 0)).unwrap();
    assert!(matches!(
        engine.drag_start(c(1, 1)),
        Err(GridError::GestureActive {
            active: "range_select"
        })
    ));
    assert_eq!(engine.drag_source(), None);
}

#[test]
fn test_drag_of_merged_cell_moves_owner_value() {
    let mut engine = engine(10, 10);
    engine.commit_edit(c(0, 0), "header").unwrap();
    engine.merge_cells([c(0, 0), c(0, 2)]).unwrap();
    // Pick up through an absorbed coordinate
    engine.drag_start(c(0, 1)).unwrap();
    engine.drop(c(5, 5)).unwrap();
    assert_label(&engine, c(5, 5), "header");
    assert_label(&engine, c(0, 2), "F6");
}

#[test]
fn test_drop_out_of_bounds_keeps_pick_up() {
    let mut engine = engine(10, 10);
    engine.drag_start(c(0, 0)).unwrap();
    assert!(engine.drop(c(10, 10)).is_err());
    assert_eq!(engine.drag_source(), Some(c(0, 0)));
    engine.drag_end();
}

#[test]
fn test_merge_over_pending_pick_up_moves_it_to_owner() {
    let mut engine = engine(10, 10);
    engine.commit_edit(c(0, 0), "owner").unwrap();
    engine.drag_start(c(1, 1)).unwrap();
    engine.drag_over(c(0, 1)).unwrap();
    engine.merge_cells([c(0, 0), c(1, 1)]).unwrap();

    assert_eq!(engine.drag_source(), Some(c(0, 0)));
    assert_eq!(engine.drag_hover(), Some(c(0, 0)));
    assert_eq!(engine.gesture(), GestureMode::DragSwap { source: c(0, 0) });

    let swapped = engine.drop(c(5, 5)).unwrap();
    assert_eq!(swapped, Some((c(0, 0), c(5, 5))));
    assert_label(&engine, c(5, 5), "owner");
    assert_label(&engine, c(1, 1), "F6");
    assert_eq!(engine.store().stored(c(1, 1)), None);
}
