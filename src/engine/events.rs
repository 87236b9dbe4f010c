//! Keyboard, pointer and drag input for [`SheetEngine`].
//!
//! Pointer gestures are modal. Starting one while another runs is rejected
//! with `GestureActive`; `pointer_up` always ends whatever is running.

use serde::Serialize;

use super::{GestureMode, SheetEngine};
use crate::error::{GridError, Result};
use crate::navigation::{KeyCommand, Modifiers};
use crate::types::Coord;

/// What a keystroke did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum KeyOutcome {
    Moved { from: Coord, to: Coord },
    /// Movement blocked at the grid edge
    Unchanged { at: Coord },
    SelectionCleared,
    EditStarted { coord: Coord, initial: String },
    /// Unhandled key, or no active cell yet
    Ignored,
}

impl SheetEngine {
    /// Handle a keystroke given as a DOM key name.
    pub fn key_command(&mut self, key: &str, modifiers: Modifiers) -> KeyOutcome {
        let Some(command) = KeyCommand::parse(key, modifiers) else {
            return KeyOutcome::Ignored;
        };
        match command {
            KeyCommand::ClearSelection => {
                self.clear_selection();
                KeyOutcome::SelectionCleared
            }
            KeyCommand::Move {
                direction,
                extended,
            } => {
                let active = self.selection.active();
                match self
                    .navigation
                    .navigate(active, direction, extended, &self.merges)
                {
                    Ok(to) => {
                        let from = active.unwrap_or(to);
                        if from == to {
                            return KeyOutcome::Unchanged { at: to };
                        }
                        self.focus(to);
                        KeyOutcome::Moved { from, to }
                    }
                    Err(_) => {
                        tracing::trace!(key, "navigation without an active cell");
                        KeyOutcome::Ignored
                    }
                }
            }
            KeyCommand::BeginEdit => {
                let Some(active) = self.selection.active() else {
                    tracing::trace!(key, "edit without an active cell");
                    return KeyOutcome::Ignored;
                };
                match self.double_click(active) {
                    Ok(initial) => KeyOutcome::EditStarted {
                        coord: self.merges.resolve(active),
                        initial,
                    },
                    Err(_) => KeyOutcome::Ignored,
                }
            }
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.gesture.is_idle() {
            Ok(())
        } else {
            let active = self.gesture.name();
            tracing::warn!(active, "gesture rejected, another is in progress");
            Err(GridError::GestureActive { active })
        }
    }

    // ---- Range selection ----

    /// Press on a cell: focus it and start a range selection there.
    ///
    /// # Errors
    /// `OutOfBounds`, or `GestureActive` if another gesture is running.
    pub fn pointer_down(&mut self, coord: Coord) -> Result<()> {
        let owner = self.target(coord)?;
        self.ensure_idle()?;
        self.focus(owner);
        self.selection.begin_range(owner);
        self.gesture = GestureMode::RangeSelect { anchor: owner };
        tracing::debug!(anchor = %owner, "range selection started");
        Ok(())
    }

    /// Pointer entered a cell. Extends the range while one is being dragged.
    /// Returns whether the range changed.
    ///
    /// # Errors
    /// Returns `OutOfBounds` outside the grid.
    pub fn pointer_move_to_cell(&mut self, coord: Coord) -> Result<bool> {
        let coord = self.target(coord)?;
        if !matches!(self.gesture, GestureMode::RangeSelect { .. }) {
            return Ok(false);
        }
        let changed = self.selection.extend_range(coord);
        if changed {
            tracing::debug!(focus = %coord, "range extended");
        }
        Ok(changed)
    }

    // ---- Resize ----

    /// Grab a column's right edge at content x-position `x`.
    ///
    /// # Errors
    /// `OutOfBounds`, or `GestureActive` if another gesture is running.
    pub fn begin_column_resize(&mut self, col: u32, x: f32) -> Result<()> {
        let size = self.size();
        let origin_width = self
            .layout
            .col_width(col)
            .ok_or(GridError::OutOfBounds {
                coord: Coord::new(0, col),
                size,
            })?;
        self.ensure_idle()?;
        self.gesture = GestureMode::ColumnResize {
            col,
            origin_x: x,
            origin_width,
        };
        tracing::debug!(col, "column resize started");
        Ok(())
    }

    /// Grab a row's bottom edge at content y-position `y`.
    ///
    /// # Errors
    /// `OutOfBounds`, or `GestureActive` if another gesture is running.
    pub fn begin_row_resize(&mut self, row: u32, y: f32) -> Result<()> {
        let size = self.size();
        let origin_height = self
            .layout
            .row_height(row)
            .ok_or(GridError::OutOfBounds {
                coord: Coord::new(row, 0),
                size,
            })?;
        self.ensure_idle()?;
        self.gesture = GestureMode::RowResize {
            row,
            origin_y: y,
            origin_height,
        };
        tracing::debug!(row, "row resize started");
        Ok(())
    }

    /// Pointer moved to content position `(x, y)`. Resizes the grabbed track
    /// by the distance travelled. Returns whether a size changed.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        match self.gesture {
            GestureMode::ColumnResize {
                col,
                origin_x,
                origin_width,
            } => self.layout.resize_column(col, origin_width + (x - origin_x)),
            GestureMode::RowResize {
                row,
                origin_y,
                origin_height,
            } => self.layout.resize_row(row, origin_height + (y - origin_y)),
            GestureMode::Idle | GestureMode::RangeSelect { .. } | GestureMode::DragSwap { .. } => {
                false
            }
        }
    }

    /// End whatever gesture is running, wherever the pointer is.
    pub fn pointer_up(&mut self) -> GestureMode {
        let ended = std::mem::take(&mut self.gesture);
        if let GestureMode::DragSwap { .. } = ended {
            self.drag.cancel();
        }
        if !ended.is_idle() {
            tracing::debug!(mode = ended.name(), "gesture ended");
        }
        ended
    }

    // ---- Drag-swap ----

    /// Pick up a cell's value. Returns the source in effect; repeated
    /// pick-ups during one drag keep the first source.
    ///
    /// # Errors
    /// `OutOfBounds`, or `GestureActive` if a non-drag gesture is running.
    pub fn drag_start(&mut self, coord: Coord) -> Result<Coord> {
        let owner = self.target(coord)?;
        if !matches!(self.gesture, GestureMode::DragSwap { .. }) {
            self.ensure_idle()?;
        }
        let source = self.drag.pick_up(owner);
        self.gesture = GestureMode::DragSwap { source };
        tracing::debug!(%source, "drag started");
        Ok(source)
    }

    /// Pointer is dragging over `coord`.
    ///
    /// # Errors
    /// Returns `OutOfBounds` outside the grid.
    pub fn drag_over(&mut self, coord: Coord) -> Result<()> {
        let owner = self.target(coord)?;
        self.drag.drag_over(owner);
        Ok(())
    }

    /// Drop onto `coord`, swapping values with the picked-up cell.
    /// Returns the swapped pair, or `None` if nothing was picked up.
    ///
    /// # Errors
    /// Returns `OutOfBounds` outside the grid; the pick-up is kept.
    pub fn drop(&mut self, coord: Coord) -> Result<Option<(Coord, Coord)>> {
        let owner = self.target(coord)?;
        if matches!(self.gesture, GestureMode::DragSwap { .. }) {
            self.gesture = GestureMode::Idle;
        }
        self.drag.drop(owner, &mut self.store)
    }

    /// The drag finished without a drop, or after one. Clears any pick-up.
    pub fn drag_end(&mut self) {
        if let Some(source) = self.drag.cancel() {
            tracing::debug!(%source, "drag abandoned");
        }
        if matches!(self.gesture, GestureMode::DragSwap { .. }) {
            self.gesture = GestureMode::Idle;
        }
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

    fn engine() -> SheetEngine {
        SheetEngine::with_size(10, 10).unwrap()
    }

    #[test]
    fn test_arrow_without_focus_is_ignored() {
        let mut engine = engine();
        assert_eq!(
            engine.key_command("ArrowDown", Modifiers::NONE),
            KeyOutcome::Ignored
        );
        assert_eq!(engine.active(), None);
    }

    #[test]
    fn test_arrow_moves_focus() {
        let mut engine = engine();
        engine.click(Coord::new(3, 3)).unwrap();
        assert_eq!(
            engine.key_command("ArrowRight", Modifiers::NONE),
            KeyOutcome::Moved {
                from: Coord::new(3, 3),
                to: Coord::new(3, 4)
            }
        );
        assert_eq!(
            engine.key_command("ArrowUp", Modifiers::CTRL),
            KeyOutcome::Moved {
                from: Coord::new(3, 4),
                to: Coord::new(0, 4)
            }
        );
        assert_eq!(
            engine.key_command("ArrowUp", Modifiers::NONE),
            KeyOutcome::Unchanged {
                at: Coord::new(0, 4)
            }
        );
    }

    #[test]
    fn test_escape_and_enter() {
        let mut engine = engine();
        engine.click(Coord::new(1, 1)).unwrap();
        assert_eq!(
            engine.key_command("Escape", Modifiers::NONE),
            KeyOutcome::SelectionCleared
        );
        assert!(engine.selected().is_empty());
        assert!(engine.is_active(Coord::new(1, 1)));
        assert_eq!(
            engine.key_command("Enter", Modifiers::NONE),
            KeyOutcome::EditStarted {
                coord: Coord::new(1, 1),
                initial: "B2".to_string()
            }
        );
    }

    #[test]
    fn test_range_select_gesture() {
        let mut engine = engine();
        engine.pointer_down(Coord::new(5, 5)).unwrap();
        assert!(engine.pointer_move_to_cell(Coord::new(2, 2)).unwrap());
        assert_eq!(engine.selected().len(), 16);
        engine.pointer_up();
        assert!(engine.gesture().is_idle());
        assert!(!engine.pointer_move_to_cell(Coord::new(9, 9)).unwrap());
        assert_eq!(engine.selected().len(), 16);
    }

    #[test]
    fn test_gestures_are_exclusive() {
        let mut engine = engine();
        engine.begin_column_resize(2, 100.0).unwrap();
        assert!(matches!(
            engine.pointer_down(Coord::new(0, 0)),
            Err(GridError::GestureActive {
                active: "column_resize"
            })
        ));
        assert_eq!(engine.active(), None);
        assert!(engine.drag_start(Coord::new(0, 0)).is_err());
        engine.pointer_up();
        assert!(engine.pointer_down(Coord::new(0, 0)).is_ok());
    }

    #[test]
    fn test_column_resize_by_delta() {
        let mut engine = engine();
        engine.begin_column_resize(1, 200.0).unwrap();
        assert!(engine.pointer_move(236.0, 0.0));
        assert_eq!(engine.layout().col_width(1), Some(100.0));
        // 64 - 60 = 4 is under the minimum
        assert!(!engine.pointer_move(140.0, 0.0));
        assert_eq!(engine.layout().col_width(1), Some(100.0));
        engine.pointer_up();
        assert!(!engine.pointer_move(500.0, 0.0));
    }

    #[test]
    fn test_drag_swap_gesture() {
        let mut engine = engine();
        engine.commit_edit(Coord::new(0, 0), "src").unwrap();
        assert_eq!(engine.drag_start(Coord::new(0, 0)).unwrap(), Coord::new(0, 0));
        engine.drag_over(Coord::new(2, 2)).unwrap();
        assert_eq!(engine.drag_hover(), Some(Coord::new(2, 2)));
        let swapped = engine.drop(Coord::new(2, 2)).unwrap();
        assert_eq!(swapped, Some((Coord::new(0, 0), Coord::new(2, 2))));
        engine.drag_end();
        assert_eq!(engine.cell_label(Coord::new(2, 2)).unwrap(), "src");
        assert_eq!(engine.cell_label(Coord::new(0, 0)).unwrap(), "C3");
        assert!(engine.gesture().is_idle());
    }

    #[test]
    fn test_pointer_up_abandons_drag() {
        let mut engine = engine();
        engine.drag_start(Coord::new(1, 1)).unwrap();
        assert_eq!(
            engine.pointer_up(),
            GestureMode::DragSwap {
                source: Coord::new(1, 1)
            }
        );
        assert_eq!(engine.drag_source(), None);
        assert_eq!(engine.drop(Coord::new(3, 3)).unwrap(), None);
    }
}
