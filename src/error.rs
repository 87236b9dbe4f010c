//! Structured error types for sheetgrid.
//!
//! Every failure the engine can report is a variant here and is returned as a
//! value. None of them abort.

use crate::types::{Coord, GridSize, MergeRegion};

/// All errors that grid commands can report.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Coordinate outside the grid extent. Indicates a caller bug.
    #[error("coordinate {coord} is outside the {size} grid")]
    OutOfBounds { coord: Coord, size: GridSize },

    /// Merge attempted with fewer than two coordinates.
    #[error("merge needs at least 2 cells, got {count}")]
    TooFewCells { count: usize },

    /// Merge rectangle intersects a region that is already tracked.
    #[error(
        "merge {}..{} overlaps existing region {}..{}",
        .requested.top_left, .requested.bottom_right, .existing.top_left, .existing.bottom_right
    )]
    OverlapConflict {
        requested: MergeRegion,
        existing: MergeRegion,
    },

    /// A focus-relative command arrived before any cell was focused.
    #[error("no active cell")]
    NoActiveCell,

    /// A modal gesture was started while another one is still running.
    #[error("gesture already in progress: {active}")]
    GestureActive { active: &'static str },

    /// Configuration rejected by validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Invalid A1-style cell reference.
    #[error("invalid cell reference: {0}")]
    InvalidCellRef(String),

    /// JSON (de)serialization of config, commands or snapshots.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
