//! Common test utilities and assertion helpers.
//!
//! Builders for engines in a known state plus assertions that print the
//! grid coordinates involved on failure.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use sheetgrid::engine::SheetEngine;
use sheetgrid::{Coord, GridConfig, RowLabelOrigin};

// ============================================================================
// Engine builders
// ============================================================================

/// 40x30 grid with default settings, the size the browser demo uses.
#[must_use]
pub fn default_engine() -> SheetEngine {
    SheetEngine::new(GridConfig::default()).expect("default config is valid")
}

#[must_use]
pub fn engine(rows: u32, cols: u32) -> SheetEngine {
    SheetEngine::with_size(rows, cols).expect("grid size is valid")
}

#[must_use]
pub fn zero_based_engine(rows: u32, cols: u32) -> SheetEngine {
    SheetEngine::new(GridConfig {
        row_label_origin: RowLabelOrigin::ZeroBased,
        ..GridConfig::with_size(rows, cols)
    })
    .expect("grid size is valid")
}

/// Engine with `coord` focused (and toggled into the selection).
#[must_use]
pub fn focused_engine(rows: u32, cols: u32, coord: Coord) -> SheetEngine {
    let mut engine = engine(rows, cols);
    engine.click(coord).expect("coord is in bounds");
    engine
}

#[must_use]
pub fn c(row: u32, col: u32) -> Coord {
    Coord::new(row, col)
}

// ============================================================================
// Assertions
// ============================================================================

pub fn assert_label(engine: &SheetEngine, coord: Coord, expected: &str) {
    let label = engine.cell_label(coord).expect("coord is in bounds");
    assert_eq!(label, expected, "label at {coord}");
}

pub fn assert_active(engine: &SheetEngine, expected: Coord) {
    assert_eq!(
        engine.active(),
        Some(expected),
        "active cell should be {expected}"
    );
}

/// Assert the selected set is exactly the rectangle `top_left..=bottom_right`.
pub fn assert_selected_block(engine: &SheetEngine, top_left: Coord, bottom_right: Coord) {
    let selected = engine.selected();
    let expected_len = (bottom_right.row - top_left.row + 1) * (bottom_right.col - top_left.col + 1);
    assert_eq!(
        selected.len(),
        expected_len as usize,
        "selected set size for block {top_left}..{bottom_right}"
    );
    for row in top_left.row..=bottom_right.row {
        for col in top_left.col..=bottom_right.col {
            assert!(
                selected.contains(&Coord::new(row, col)),
                "({row}, {col}) should be selected"
            );
        }
    }
}
