//! Grid configuration.
//!
//! Loaded from JSON by the browser facade and the CLI. Every field has a
//! default so callers only spell out what they change.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::types::GridSize;

pub use crate::cell_ref::RowLabelOrigin;

/// Default column width in pixels
pub const DEFAULT_COL_WIDTH: f32 = 64.0;

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: f32 = 20.0;

/// Columns can't be dragged to this width or narrower
pub const MIN_COL_WIDTH: f32 = 50.0;

/// Rows can't be dragged to this height or shorter
pub const MIN_ROW_HEIGHT: f32 = 20.0;

/// Largest row count a grid may have
pub const MAX_ROWS: u32 = 1_048_576;

/// Largest column count a grid may have (column `XFD`)
pub const MAX_COLS: u32 = 16_384;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
    pub row_label_origin: RowLabelOrigin,
    pub default_col_width: f32,
    pub default_row_height: f32,
    pub min_col_width: f32,
    pub min_row_height: f32,
    /// Width of the sticky row-label band on the left
    pub row_header_width: f32,
    /// Height of the sticky column-letter band on top
    pub col_header_height: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 40,
            cols: 30,
            row_label_origin: RowLabelOrigin::OneBased,
            default_col_width: DEFAULT_COL_WIDTH,
            default_row_height: DEFAULT_ROW_HEIGHT,
            min_col_width: MIN_COL_WIDTH,
            min_row_height: MIN_ROW_HEIGHT,
            row_header_width: 40.0,
            col_header_height: 20.0,
        }
    }
}

impl GridConfig {
    /// Config for a `rows x cols` grid with every other field defaulted.
    pub fn with_size(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config.
    ///
    /// # Errors
    /// Returns `Json` for malformed input and `InvalidConfig` if validation fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn size(&self) -> GridSize {
        GridSize::new(self.rows, self.cols)
    }

    /// Reject configs that can't describe a usable grid.
    ///
    /// # Errors
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::InvalidConfig(format!(
                "grid must have at least one row and column, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.rows > MAX_ROWS || self.cols > MAX_COLS {
            return Err(GridError::InvalidConfig(format!(
                "grid is limited to {MAX_ROWS}x{MAX_COLS}, got {}x{}",
                self.rows, self.cols
            )));
        }
        let sizes = [
            ("default_col_width", self.default_col_width),
            ("default_row_height", self.default_row_height),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(GridError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        let bounds = [
            ("min_col_width", self.min_col_width),
            ("min_row_height", self.min_row_height),
            ("row_header_width", self.row_header_width),
            ("col_header_height", self.col_header_height),
        ];
        for (name, value) in bounds {
            if !(value.is_finite() && value >= 0.0) {
                return Err(GridError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GridConfig::from_json(r#"{"rows": 100, "cols": 26}"#).unwrap();
        assert_eq!(config.size(), GridSize::new(100, 26));
        assert_eq!(config.row_label_origin, RowLabelOrigin::OneBased);
        assert_eq!(config.min_col_width, MIN_COL_WIDTH);
    }

    #[test]
    fn test_zero_based_origin() {
        let config = GridConfig::from_json(r#"{"row_label_origin": "zero_based"}"#).unwrap();
        assert_eq!(config.row_label_origin, RowLabelOrigin::ZeroBased);
        assert_eq!(config.rows, 40);
    }

    #[test]
    fn test_rejects_empty_grid() {
        let err = GridConfig::from_json(r#"{"rows": 0}"#).unwrap_err();
        assert!(matches!(err, GridError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_bad_sizes() {
        let mut config = GridConfig::default();
        config.default_col_width = 0.0;
        assert!(config.validate().is_err());

        let mut config = GridConfig::default();
        config.row_header_width = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = GridConfig::from_json("{rows: 3").unwrap_err();
        assert!(matches!(err, GridError::Json(_)));
    }
}
