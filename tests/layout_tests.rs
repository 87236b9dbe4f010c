//! Grid geometry tests: track sizes, hit testing and resize limits.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{c, engine};
use sheetgrid::engine::GestureMode;
use sheetgrid::layout::SheetLayout;
use sheetgrid::{GridConfig, GridError};
use test_case::test_case;

fn layout() -> SheetLayout {
    SheetLayout::new(&GridConfig::with_size(10, 5))
}

// ============================================================================
// CELL BOXES
// ============================================================================

#[test]
fn test_cell_box_includes_header_bands() {
    let layout = layout();
    let first = layout.cell_box(c(0, 0), None).unwrap();
    assert_eq!(first.left, 40.0);
    assert_eq!(first.top, 20.0);
    assert_eq!(first.width(), 64.0);
    assert_eq!(first.height(), 20.0);

    let other = layout.cell_box(c(3, 2), None).unwrap();
    assert_eq!(other.left, 40.0 + 2.0 * 64.0);
    assert_eq!(other.top, 20.0 + 3.0 * 20.0);
}

#[test]
fn test_cell_box_outside_grid() {
    assert_eq!(layout().cell_box(c(10, 0), None), None);
    assert_eq!(layout().cell_box(c(0, 5), None), None);
}

#[test]
fn test_totals() {
    let layout = layout();
    assert_eq!(layout.total_width(), 40.0 + 5.0 * 64.0);
    assert_eq!(layout.total_height(), 20.0 + 10.0 * 20.0);
}

// ============================================================================
// HIT TESTING
// ============================================================================

#[test_case(41.0, 21.0, Some(c(0, 0)) ; "first cell")]
#[test_case(104.0, 40.0, Some(c(1, 1)) ; "shared edge belongs to next track")]
#[test_case(359.0, 219.0, Some(c(9, 4)) ; "last cell")]
#[test_case(10.0, 50.0, None ; "row label band")]
#[test_case(100.0, 5.0, None ; "column letter band")]
#[test_case(360.0, 50.0, None ; "past last column")]
fn test_cell_at_point(x: f32, y: f32, expected: Option<sheetgrid::Coord>) {
    assert_eq!(layout().cell_at_point(x, y), expected);
}

#[test]
fn test_engine_hit_test_resolves_merges() {
    let mut engine = engine(10, 5);
    engine.merge_cells([c(0, 0), c(1, 1)]).unwrap();
    // Inside (1, 1) on screen
    assert_eq!(engine.cell_at_point(110.0, 45.0), Some(c(0, 0)));
}

// ============================================================================
// RESIZE
// ============================================================================

#[test_case(50.0, false ; "at minimum")]
#[test_case(30.0, false ; "below minimum")]
#[test_case(50.5, true ; "just above minimum")]
#[test_case(200.0, true ; "wide")]
fn test_column_minimum_is_exclusive(width: f32, applied: bool) {
    let mut engine = engine(10, 5);
    assert_eq!(engine.resize_column(2, width).unwrap(), applied);
    let expected = if applied { width } else { 64.0 };
    assert_eq!(engine.layout().col_width(2), Some(expected));
}

#[test_case(20.0, false ; "at minimum")]
#[test_case(20.5, true ; "just above minimum")]
fn test_row_minimum_is_exclusive(height: f32, applied: bool) {
    let mut engine = engine(10, 5);
    assert_eq!(engine.resize_row(4, height).unwrap(), applied);
}

#[test]
fn test_resize_shifts_later_tracks() {
    let mut engine = engine(10, 5);
    engine.resize_column(0, 100.0).unwrap();
    engine.resize_row(0, 50.0).unwrap();
    let moved = engine.cell_box(c(1, 1)).unwrap();
    assert_eq!(moved.left, 40.0 + 100.0);
    assert_eq!(moved.top, 20.0 + 50.0);
    assert_eq!(engine.cell_at_point(150.0, 75.0), Some(c(1, 1)));
}

#[test]
fn test_resize_gesture_tracks_pointer() {
    let mut engine = engine(10, 5);
    engine.begin_row_resize(2, 100.0).unwrap();
    assert!(matches!(engine.gesture(), GestureMode::RowResize { row: 2, .. }));
    assert!(engine.pointer_move(0.0, 130.0));
    assert_eq!(engine.layout().row_height(2), Some(50.0));
    assert!(engine.pointer_move(0.0, 110.0));
    assert_eq!(engine.layout().row_height(2), Some(30.0));
    // Release anywhere ends the gesture
    engine.pointer_up();
    assert!(engine.gesture().is_idle());
    assert!(!engine.pointer_move(0.0, 400.0));
    assert_eq!(engine.layout().row_height(2), Some(30.0));
}

#[test]
fn test_resize_out_of_bounds() {
    let mut engine = engine(10, 5);
    assert!(matches!(
        engine.resize_column(5, 100.0),
        Err(GridError::OutOfBounds { .. })
    ));
    assert!(engine.begin_column_resize(5, 0.0).is_err());
    assert!(engine.gesture().is_idle());
}
