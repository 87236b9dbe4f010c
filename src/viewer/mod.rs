//! `GridView`, the WASM-exported entry point for a browser renderer.
//!
//! The renderer owns the DOM. It forwards normalized input to `GridView`,
//! then re-reads labels, selection and merge boxes when the render callback
//! fires. Complex values cross the boundary as plain JS objects through
//! `serde-wasm-bindgen`.

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use web_sys::KeyboardEvent;

use crate::config::GridConfig;
use crate::engine::{Command, SheetEngine};
use crate::error::GridError;
use crate::layout::Viewport;
use crate::navigation::Modifiers;
use crate::types::Coord;

fn js_error(e: GridError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

#[wasm_bindgen]
pub struct GridView {
    engine: SheetEngine,
    #[cfg(target_arch = "wasm32")]
    render_callback: Option<Function>,
}

#[wasm_bindgen]
impl GridView {
    /// Create a grid from an optional JSON config (see `GridConfig`).
    ///
    /// # Errors
    /// Returns an error string if the config is malformed or invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config_json {
            Some(json) => GridConfig::from_json(&json).map_err(js_error)?,
            None => GridConfig::default(),
        };
        let engine = SheetEngine::new(config).map_err(js_error)?;
        Ok(Self {
            engine,
            #[cfg(target_arch = "wasm32")]
            render_callback: None,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> u32 {
        self.engine.size().rows
    }

    #[wasm_bindgen(getter)]
    pub fn cols(&self) -> u32 {
        self.engine.size().cols
    }

    // ---- Queries ----

    #[wasm_bindgen(js_name = "cellLabel")]
    pub fn cell_label(&self, row: u32, col: u32) -> Result<String, JsValue> {
        self.engine
            .cell_label(Coord::new(row, col))
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = "isSelected")]
    pub fn is_selected(&self, row: u32, col: u32) -> bool {
        self.engine.is_selected(Coord::new(row, col))
    }

    #[wasm_bindgen(js_name = "isActive")]
    pub fn is_active(&self, row: u32, col: u32) -> bool {
        self.engine.is_active(Coord::new(row, col))
    }

    /// True for cells hidden under a merge owner.
    #[wasm_bindgen(js_name = "isAbsorbed")]
    pub fn is_absorbed(&self, row: u32, col: u32) -> bool {
        self.engine.is_absorbed(Coord::new(row, col))
    }

    /// `{top_left, bottom_right}` or `undefined`.
    #[wasm_bindgen(js_name = "mergeRegionFor")]
    pub fn merge_region_for(&self, row: u32, col: u32) -> Result<JsValue, JsValue> {
        to_js(&self.engine.merge_region_for(Coord::new(row, col)))
    }

    /// Pixel box `{left, right, top, bottom}`; merged cells span their region.
    #[wasm_bindgen(js_name = "cellBox")]
    pub fn cell_box(&self, row: u32, col: u32) -> Result<JsValue, JsValue> {
        let cell = self
            .engine
            .cell_box(Coord::new(row, col))
            .map_err(js_error)?;
        to_js(&cell)
    }

    /// Scroll offsets `{left, top}` that bring the cell fully into view.
    #[wasm_bindgen(js_name = "scrollTargetFor")]
    pub fn scroll_target_for(
        &self,
        row: u32,
        col: u32,
        scroll_x: f32,
        scroll_y: f32,
        width: f32,
        height: f32,
    ) -> Result<JsValue, JsValue> {
        let viewport = self
            .engine
            .viewport(width, height)
            .with_scroll(scroll_x, scroll_y);
        let target = self
            .engine
            .scroll_target_for(Coord::new(row, col), &viewport)
            .map_err(js_error)?;
        to_js(&target)
    }

    /// Scroll target for the active cell, or `undefined` with no focus.
    #[wasm_bindgen(js_name = "scrollToActive")]
    pub fn scroll_to_active(&self, viewport: JsValue) -> Result<JsValue, JsValue> {
        let viewport: Viewport = serde_wasm_bindgen::from_value(viewport)?;
        let Some(active) = self.engine.active() else {
            return Ok(JsValue::UNDEFINED);
        };
        let target = self
            .engine
            .scroll_target_for(active, &viewport)
            .map_err(js_error)?;
        to_js(&target)
    }

    /// `[row, col]` under a content point, or `undefined`.
    #[wasm_bindgen(js_name = "cellAtPoint")]
    pub fn cell_at_point(&self, x: f32, y: f32) -> Option<Vec<u32>> {
        self.engine
            .cell_at_point(x, y)
            .map(|coord| vec![coord.row, coord.col])
    }

    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.snapshot())
    }

    // ---- Commands ----

    #[wasm_bindgen]
    pub fn click(&mut self, row: u32, col: u32) -> Result<bool, JsValue> {
        let selected = self.engine.click(Coord::new(row, col)).map_err(js_error)?;
        self.request_render();
        Ok(selected)
    }

    /// Begin editing. Returns the text the editor overlay opens with.
    #[wasm_bindgen(js_name = "doubleClick")]
    pub fn double_click(&mut self, row: u32, col: u32) -> Result<String, JsValue> {
        let initial = self
            .engine
            .double_click(Coord::new(row, col))
            .map_err(js_error)?;
        self.request_render();
        Ok(initial)
    }

    #[wasm_bindgen(js_name = "commitEdit")]
    pub fn commit_edit(&mut self, row: u32, col: u32, text: &str) -> Result<String, JsValue> {
        let value = self
            .engine
            .commit_edit(Coord::new(row, col), text)
            .map_err(js_error)?;
        self.request_render();
        Ok(value)
    }

    #[wasm_bindgen(js_name = "cancelEdit")]
    pub fn cancel_edit(&mut self, row: u32, col: u32) -> Result<bool, JsValue> {
        let closed = self
            .engine
            .cancel_edit(Coord::new(row, col))
            .map_err(js_error)?;
        self.request_render();
        Ok(closed)
    }

    /// Handle a key by DOM name. Returns the outcome object.
    #[wasm_bindgen(js_name = "keyCommand")]
    pub fn key_command(
        &mut self,
        key: &str,
        ctrl: bool,
        meta: bool,
        shift: bool,
        alt: bool,
    ) -> Result<JsValue, JsValue> {
        let modifiers = Modifiers {
            ctrl,
            meta,
            shift,
            alt,
        };
        let outcome = self.engine.key_command(key, modifiers);
        self.request_render();
        to_js(&outcome)
    }

    #[wasm_bindgen(js_name = "dragStart")]
    pub fn drag_start(&mut self, row: u32, col: u32) -> Result<(), JsValue> {
        self.engine
            .drag_start(Coord::new(row, col))
            .map_err(js_error)?;
        self.request_render();
        Ok(())
    }

    #[wasm_bindgen(js_name = "dragOver")]
    pub fn drag_over(&mut self, row: u32, col: u32) -> Result<(), JsValue> {
        self.engine
            .drag_over(Coord::new(row, col))
            .map_err(js_error)?;
        self.request_render();
        Ok(())
    }

    /// Drop onto a cell. Returns whether two cells were swapped.
    #[wasm_bindgen(js_name = "drop")]
    pub fn drop_on(&mut self, row: u32, col: u32) -> Result<bool, JsValue> {
        let swapped = self.engine.drop(Coord::new(row, col)).map_err(js_error)?;
        self.request_render();
        Ok(swapped.is_some())
    }

    #[wasm_bindgen(js_name = "dragEnd")]
    pub fn drag_end(&mut self) {
        self.engine.drag_end();
        self.request_render();
    }

    /// Merge the selected cells. Returns the new region.
    #[wasm_bindgen(js_name = "mergeSelected")]
    pub fn merge_selected(&mut self) -> Result<JsValue, JsValue> {
        let region = self.engine.merge_selected().map_err(js_error)?;
        self.request_render();
        to_js(&region)
    }

    #[wasm_bindgen(js_name = "clearSelection")]
    pub fn clear_selection(&mut self) {
        self.engine.clear_selection();
        self.request_render();
    }

    #[wasm_bindgen(js_name = "resizeColumn")]
    pub fn resize_column(&mut self, col: u32, width: f32) -> Result<bool, JsValue> {
        let applied = self.engine.resize_column(col, width).map_err(js_error)?;
        if applied {
            self.request_render();
        }
        Ok(applied)
    }

    #[wasm_bindgen(js_name = "resizeRow")]
    pub fn resize_row(&mut self, row: u32, height: f32) -> Result<bool, JsValue> {
        let applied = self.engine.resize_row(row, height).map_err(js_error)?;
        if applied {
            self.request_render();
        }
        Ok(applied)
    }

    #[wasm_bindgen(js_name = "pointerDown")]
    pub fn pointer_down(&mut self, row: u32, col: u32) -> Result<(), JsValue> {
        self.engine
            .pointer_down(Coord::new(row, col))
            .map_err(js_error)?;
        self.request_render();
        Ok(())
    }

    #[wasm_bindgen(js_name = "pointerEnter")]
    pub fn pointer_enter(&mut self, row: u32, col: u32) -> Result<bool, JsValue> {
        let changed = self
            .engine
            .pointer_move_to_cell(Coord::new(row, col))
            .map_err(js_error)?;
        if changed {
            self.request_render();
        }
        Ok(changed)
    }

    #[wasm_bindgen(js_name = "beginColumnResize")]
    pub fn begin_column_resize(&mut self, col: u32, x: f32) -> Result<(), JsValue> {
        self.engine.begin_column_resize(col, x).map_err(js_error)
    }

    #[wasm_bindgen(js_name = "beginRowResize")]
    pub fn begin_row_resize(&mut self, row: u32, y: f32) -> Result<(), JsValue> {
        self.engine.begin_row_resize(row, y).map_err(js_error)
    }

    #[wasm_bindgen(js_name = "pointerMove")]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let changed = self.engine.pointer_move(x, y);
        if changed {
            self.request_render();
        }
        changed
    }

    #[wasm_bindgen(js_name = "pointerUp")]
    pub fn pointer_up(&mut self) {
        self.engine.pointer_up();
        self.request_render();
    }

    /// Run a command object such as `{type: "click", row: 0, col: 0}`.
    #[wasm_bindgen]
    pub fn dispatch(&mut self, command: JsValue) -> Result<JsValue, JsValue> {
        let command: Command = serde_wasm_bindgen::from_value(command)?;
        let outcome = self.engine.dispatch(command).map_err(js_error)?;
        self.request_render();
        to_js(&outcome)
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GridView {
    /// Register a JS callback invoked after every mutation.
    #[wasm_bindgen(js_name = "setRenderCallback")]
    pub fn set_render_callback(&mut self, callback: Option<Function>) {
        self.render_callback = callback;
    }

    /// Feed a `keydown` event. Calls `preventDefault` on keys the grid used.
    #[wasm_bindgen(js_name = "onKeyEvent")]
    pub fn on_key_event(&mut self, event: &KeyboardEvent) -> bool {
        let modifiers = Modifiers {
            ctrl: event.ctrl_key(),
            meta: event.meta_key(),
            shift: event.shift_key(),
            alt: event.alt_key(),
        };
        let outcome = self.engine.key_command(&event.key(), modifiers);
        let handled = outcome != crate::engine::KeyOutcome::Ignored;
        if handled {
            event.prevent_default();
            self.request_render();
        }
        handled
    }
}

impl GridView {
    /// The engine behind this view, for native callers and tests.
    pub fn engine(&self) -> &SheetEngine {
        &self.engine
    }

    fn request_render(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(callback) = &self.render_callback {
            let _ = callback.call0(&JsValue::NULL);
        }
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

    #[test]
    fn test_view_drives_engine() {
        let mut view = GridView::new(Some(r#"{"rows": 5, "cols": 4}"#.to_string()))
            .map_err(|_| ())
            .unwrap();
        assert_eq!(view.rows(), 5);
        assert_eq!(view.cols(), 4);
        assert_eq!(view.cell_label(0, 0).map_err(|_| ()).unwrap(), "A1");
        assert!(view.click(1, 1).map_err(|_| ()).unwrap());
        assert!(view.is_selected(1, 1));
        assert!(view.is_active(1, 1));
        view.commit_edit(1, 1, " x ").map_err(|_| ()).unwrap();
        assert_eq!(view.cell_label(1, 1).map_err(|_| ()).unwrap(), "x");
        assert_eq!(view.cell_at_point(40.0 + 70.0, 20.0 + 5.0), Some(vec![0, 1]));
        assert_eq!(view.engine().store().len(), 1);
    }
}
