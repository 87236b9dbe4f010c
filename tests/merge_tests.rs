//! Merge region tests: bounding rectangles, owner resolution, rejection
//! rules, and how merges interact with values and selection.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{assert_active, assert_label, c, engine};
use sheetgrid::merge::MergeRegionTracker;
use sheetgrid::{GridError, GridSize, MergeRegion};

fn tracker() -> MergeRegionTracker {
    MergeRegionTracker::new(GridSize::new(40, 30))
}

// ============================================================================
// BOUNDING RECTANGLE
// ============================================================================

/// Test 1: Simple 2x2 merge
#[test]
fn test_simple_2x2_merge() {
    let mut merges = tracker();
    let region = merges
        .merge([c(0, 0), c(0, 1), c(1, 0), c(1, 1)])
        .unwrap();
    assert_eq!(region.top_left, c(0, 0));
    assert_eq!(region.bottom_right, c(1, 1));
    assert_eq!(merges.resolve(c(1, 1)), c(0, 0));
    assert_eq!(merges.resolve(c(0, 1)), c(0, 0));
    assert_eq!(merges.resolve(c(0, 0)), c(0, 0));
}

/// Test 2: Scattered input is bounded by its extremes
#[test]
fn test_scattered_cells_use_bounding_box() {
    let mut merges = tracker();
    let region = merges.merge([c(7, 2), c(3, 9), c(5, 4)]).unwrap();
    assert_eq!(
        region,
        MergeRegion {
            top_left: c(3, 2),
            bottom_right: c(7, 9)
        }
    );
    assert_eq!(region.row_span(), 5);
    assert_eq!(region.col_span(), 8);
    // A cell inside the box but not in the input is still absorbed
    assert_eq!(merges.resolve(c(6, 8)), c(3, 2));
}

/// Test 3: Single row and single column merges
#[test]
fn test_line_merges() {
    let mut merges = tracker();
    let row = merges.merge([c(0, 0), c(0, 5)]).unwrap();
    assert_eq!(row.row_span(), 1);
    assert_eq!(row.col_span(), 6);
    let col = merges.merge([c(2, 0), c(9, 0)]).unwrap();
    assert_eq!(col.col_span(), 1);
    assert_eq!(merges.resolve(c(5, 0)), c(2, 0));
    assert_eq!(merges.len(), 2);
}

#[test]
fn test_cells_outside_regions_resolve_to_themselves() {
    let mut merges = tracker();
    merges.merge([c(0, 0), c(1, 1)]).unwrap();
    assert_eq!(merges.resolve(c(2, 2)), c(2, 2));
    assert_eq!(merges.region_for(c(2, 2)), None);
    assert!(!merges.is_absorbed(c(0, 0)));
    assert!(merges.is_absorbed(c(1, 0)));
}

// ============================================================================
// REJECTIONS
// ============================================================================

#[test]
fn test_single_cell_is_too_few() {
    let mut merges = tracker();
    assert!(matches!(
        merges.merge([c(3, 3)]),
        Err(GridError::TooFewCells { count: 1 })
    ));
    assert!(merges.is_empty());
}

#[test]
fn test_duplicates_count_once() {
    let mut merges = tracker();
    assert!(matches!(
        merges.merge([c(3, 3), c(3, 3), c(3, 3)]),
        Err(GridError::TooFewCells { count: 1 })
    ));
    assert!(matches!(
        merges.merge(Vec::new()),
        Err(GridError::TooFewCells { count: 0 })
    ));
}

#[test]
fn test_overlap_is_rejected_without_mutation() {
    let mut merges = tracker();
    let first = merges.merge([c(0, 0), c(2, 2)]).unwrap();
    let err = merges.merge([c(2, 2), c(4, 4)]).unwrap_err();
    match err {
        GridError::OverlapConflict {
            requested,
            existing,
        } => {
            assert_eq!(existing, first);
            assert_eq!(requested.top_left, c(2, 2));
        }
        other => panic!("expected OverlapConflict, got {other:?}"),
    }
    assert_eq!(merges.len(), 1);
    assert_eq!(merges.resolve(c(3, 3)), c(3, 3));
}

#[test]
fn test_enclosing_merge_is_rejected() {
    let mut merges = tracker();
    merges.merge([c(5, 5), c(6, 6)]).unwrap();
    assert!(merges.merge([c(0, 0), c(10, 10)]).is_err());
}

#[test]
fn test_adjacent_merges_are_allowed() {
    let mut merges = tracker();
    merges.merge([c(0, 0), c(1, 1)]).unwrap();
    merges.merge([c(0, 2), c(1, 3)]).unwrap();
    merges.merge([c(2, 0), c(3, 3)]).unwrap();
    assert_eq!(merges.len(), 3);
    assert_eq!(merges.resolve(c(1, 3)), c(0, 2));
    assert_eq!(merges.resolve(c(3, 3)), c(2, 0));
}

#[test]
fn test_out_of_bounds_merge() {
    let mut merges = tracker();
    assert!(matches!(
        merges.merge([c(0, 0), c(40, 0)]),
        Err(GridError::OutOfBounds { .. })
    ));
    assert!(merges.is_empty());
}

#[test]
fn test_error_messages() {
    let err = GridError::TooFewCells { count: 1 };
    assert_eq!(err.to_string(), "merge needs at least 2 cells, got 1");
    let err = GridError::OverlapConflict {
        requested: MergeRegion::from_corners(c(1, 1), c(2, 2)),
        existing: MergeRegion::from_corners(c(0, 0), c(1, 1)),
    };
    assert_eq!(
        err.to_string(),
        "merge (1, 1)..(2, 2) overlaps existing region (0, 0)..(1, 1)"
    );
}

// ============================================================================
// ENGINE INTEGRATION
// ============================================================================

#[test]
fn test_merge_selected_from_toggles() {
    let mut engine = engine(40, 30);
    engine.click(c(0, 0)).unwrap();
    engine.click(c(0, 1)).unwrap();
    engine.click(c(1, 0)).unwrap();
    engine.click(c(1, 1)).unwrap();
    let region = engine.merge_selected().unwrap();
    assert_eq!(region.owner(), c(0, 0));
    assert!(engine.selected().is_empty());
    assert_eq!(engine.merge_region_for(c(1, 1)), Some(region));
}

#[test]
fn test_merge_selected_from_range() {
    let mut engine = engine(40, 30);
    engine.pointer_down(c(3, 4)).unwrap();
    engine.pointer_move_to_cell(c(5, 6)).unwrap();
    engine.pointer_up();
    let region = engine.merge_selected().unwrap();
    assert_eq!(region, MergeRegion::from_corners(c(3, 4), c(5, 6)));
    // The anchor was the focused cell and is the owner
    assert_active(&engine, c(3, 4));
}

#[test]
fn test_overlap_keeps_selection() {
    let mut engine = engine(40, 30);
    engine.merge_cells([c(0, 0), c(1, 1)]).unwrap();
    engine.click(c(2, 2)).unwrap();
    engine.click(c(1, 1)).unwrap(); // resolves to (0, 0)
    assert!(engine.is_selected(c(0, 0)));
    assert!(matches!(
        engine.merge_selected(),
        Err(GridError::OverlapConflict { .. })
    ));
    assert_eq!(engine.selected().len(), 2);
    assert_eq!(engine.merges().len(), 1);
}

#[test]
fn test_merge_moves_selected_absorbed_cells_to_owner() {
    let mut engine = engine(40, 30);
    engine.click(c(1, 1)).unwrap();
    engine.click(c(5, 5)).unwrap();
    engine.merge_cells([c(0, 0), c(1, 1)]).unwrap();

    assert!(!engine.is_selected(c(1, 1)));
    assert!(engine.is_selected(c(0, 0)));
    assert!(engine.is_selected(c(5, 5)));
    assert!(engine.selected().iter().all(|&cell| !engine.is_absorbed(cell)));
}

#[test]
fn test_merge_selected_after_merge_uses_visible_cells() {
    let mut engine = engine(40, 30);
    // Drag a range that reaches into the region about to be merged
    engine.pointer_down(c(1, 1)).unwrap();
    engine.pointer_move_to_cell(c(2, 2)).unwrap();
    engine.pointer_up();
    engine.merge_cells([c(0, 0), c(1, 1)]).unwrap();

    assert!(!engine.is_selected(c(1, 1)));
    assert!(engine.is_selected(c(0, 0)));
    assert_eq!(
        engine.selected().into_iter().collect::<Vec<_>>(),
        vec![c(0, 0), c(1, 2), c(2, 1), c(2, 2)]
    );
    assert!(matches!(
        engine.merge_selected(),
        Err(GridError::OverlapConflict { .. })
    ));
}

#[test]
fn test_owner_value_shows_for_whole_region() {
    let mut engine = engine(40, 30);
    engine.commit_edit(c(1, 1), "absorbed value").unwrap();
    engine.merge_cells([c(0, 0), c(1, 1)]).unwrap();
    assert_label(&engine, c(0, 0), "A1");
    assert_label(&engine, c(1, 1), "A1");
    // The absorbed value is kept but unreachable through the engine
    assert_eq!(engine.store().stored(c(1, 1)), Some("absorbed value"));
}

#[test]
fn test_merge_closes_edit_on_absorbed_cell() {
    let mut engine = engine(40, 30);
    engine.double_click(c(1, 1)).unwrap();
    engine.merge_cells([c(0, 0), c(1, 1)]).unwrap();
    assert_eq!(engine.edit_session().editing(), None);
}

#[test]
fn test_merged_cell_box_spans_region() {
    let mut engine = engine(40, 30);
    engine.merge_cells([c(0, 0), c(1, 2)]).unwrap();
    let owner = engine.cell_box(c(0, 0)).unwrap();
    let absorbed = engine.cell_box(c(1, 1)).unwrap();
    assert_eq!(owner, absorbed);
    assert_eq!(owner.width(), 3.0 * 64.0);
    assert_eq!(owner.height(), 2.0 * 20.0);

    // Resizing a covered column grows the region box
    engine.resize_column(1, 100.0).unwrap();
    let owner = engine.cell_box(c(0, 0)).unwrap();
    assert_eq!(owner.width(), 64.0 + 100.0 + 64.0);
}
