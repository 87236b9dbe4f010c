//! sheetgrid - headless spreadsheet grid interaction engine
//!
//! Tracks focus, selection, merged regions, edits and drag-swaps for a fixed
//! grid of cells, and computes the geometry a renderer needs to keep the
//! focused cell in view:
//! - Toggle and range selection, Escape to clear
//! - Arrow / Ctrl+Arrow navigation that respects merged regions
//! - Merge of arbitrary cell sets into their bounding rectangle
//! - Two-phase drag-swap of cell values
//! - Column/row resize and sticky-header aware scroll targets
//!
//! The engine never touches the DOM. A renderer drives it through
//! [`SheetEngine`] natively or [`GridView`] from JavaScript.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'sheetgrid';
//! await init();
//! const grid = new GridView(JSON.stringify({ rows: 40, cols: 30 }));
//! grid.setRenderCallback(() => requestAnimationFrame(redraw));
//! grid.click(0, 0);
//! document.addEventListener('keydown', (e) => grid.onKeyEvent(e));
//! ```

// Core state
pub mod cell_ref;
pub mod config;
pub mod drag;
pub mod editor;
pub mod error;
pub mod merge;
pub mod navigation;
pub mod selection;
pub mod store;
pub mod types;

// Geometry and engine
pub mod engine;
pub mod layout;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use config::{GridConfig, RowLabelOrigin};
pub use engine::{Command, KeyOutcome, Outcome, SheetEngine, Snapshot};
pub use error::{GridError, Result};
pub use viewer::GridView;

pub use types::*;

/// Replay a JSON command script and return the final snapshot as JSON.
///
/// The script is `{"config": {...}, "commands": [...]}`; `config` may be
/// omitted.
///
/// # Errors
/// Returns an error if the script is malformed or its config is invalid.
#[wasm_bindgen]
pub fn replay_script(script: &str) -> std::result::Result<String, JsValue> {
    let script = engine::Script::from_json(script).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let (engine, _steps) = script
        .run()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&engine.snapshot())
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
