//! Grid geometry and viewport management.
//!
//! This module handles:
//! - Column widths / row heights and resizing with minimum sizes
//! - Pixel boxes for cells and merged regions
//! - Binary search for the cell at a content position
//! - Keep-visible scroll offsets around sticky header bands

mod sheet_layout;
mod viewport;

pub use sheet_layout::{CellBox, SheetLayout};
pub use viewport::{scroll_target, ScrollOffset, Viewport};
