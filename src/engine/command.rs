//! Serializable commands and their results.
//!
//! Lets a renderer (or a replay script) drive the engine with plain JSON:
//!
//! ```json
//! {"type": "click", "row": 0, "col": 0}
//! {"type": "key", "key": "ArrowDown", "modifiers": {"ctrl": true}}
//! ```

use serde::{Deserialize, Serialize};

use super::{GestureMode, KeyOutcome, SheetEngine};
use crate::config::GridConfig;
use crate::error::Result;
use crate::navigation::Modifiers;
use crate::types::{Coord, GridSize, MergeRegion};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Click {
        row: u32,
        col: u32,
    },
    DoubleClick {
        row: u32,
        col: u32,
    },
    CommitEdit {
        row: u32,
        col: u32,
        text: String,
    },
    CancelEdit {
        row: u32,
        col: u32,
    },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    DragStart {
        row: u32,
        col: u32,
    },
    DragOver {
        row: u32,
        col: u32,
    },
    Drop {
        row: u32,
        col: u32,
    },
    DragEnd,
    MergeSelected,
    MergeCells {
        cells: Vec<Coord>,
    },
    ClearSelection,
    ResizeColumn {
        col: u32,
        width: f32,
    },
    ResizeRow {
        row: u32,
        height: f32,
    },
    PointerDown {
        row: u32,
        col: u32,
    },
    PointerEnter {
        row: u32,
        col: u32,
    },
    BeginColumnResize {
        col: u32,
        x: f32,
    },
    BeginRowResize {
        row: u32,
        y: f32,
    },
    PointerMove {
        x: f32,
        y: f32,
    },
    PointerUp,
}

impl Command {
    /// Parse a JSON array of commands.
    ///
    /// # Errors
    /// Returns `Json` for malformed input or unknown command types.
    pub fn parse_list(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Result of a dispatched command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    /// Command ran with nothing to report
    Done,
    /// Whether the command changed something (selection toggle, resize, ...)
    Changed(bool),
    /// Text produced by the command (edit initial text, committed value)
    Text(String),
    Key(KeyOutcome),
    Swapped(Option<(Coord, Coord)>),
    Merged(MergeRegion),
    DragSource(Coord),
    GestureEnded(GestureMode),
}

/// One stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEntry {
    pub row: u32,
    pub col: u32,
    pub value: String,
}

/// Engine state as plain data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub size: GridSize,
    /// Explicitly stored values only, in row-major order
    pub cells: Vec<CellEntry>,
    pub active: Option<Coord>,
    pub selected: Vec<Coord>,
    pub merges: Vec<MergeRegion>,
    pub editing: Option<Coord>,
}

/// A replayable session: an optional config plus the commands to run.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: GridConfig,
    pub commands: Vec<Command>,
}

/// Result of one scripted command. Failures are recorded, not fatal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Ok(Outcome),
    Err(String),
}

impl Script {
    /// # Errors
    /// Returns `Json` for malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build an engine from the config and run every command in order.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the config is rejected. Command failures are
    /// reported per step.
    pub fn run(self) -> Result<(SheetEngine, Vec<Step>)> {
        let mut engine = SheetEngine::new(self.config)?;
        let steps = self
            .commands
            .into_iter()
            .enumerate()
            .map(|(index, command)| match engine.dispatch(command) {
                Ok(outcome) => Step::Ok(outcome),
                Err(e) => {
                    tracing::warn!(index, error = %e, "command failed");
                    Step::Err(e.to_string())
                }
            })
            .collect();
        Ok((engine, steps))
    }
}

impl SheetEngine {
    /// Run one command to completion.
    ///
    /// # Errors
    /// Whatever the underlying command returns.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        tracing::trace!(?command, "dispatch");
        let outcome = match command {
            Command::Click { row, col } => Outcome::Changed(self.click(Coord::new(row, col))?),
            Command::DoubleClick { row, col } => {
                Outcome::Text(self.double_click(Coord::new(row, col))?)
            }
            Command::CommitEdit { row, col, text } => {
                Outcome::Text(self.commit_edit(Coord::new(row, col), &text)?)
            }
            Command::CancelEdit { row, col } => {
                Outcome::Changed(self.cancel_edit(Coord::new(row, col))?)
            }
            Command::Key { key, modifiers } => Outcome::Key(self.key_command(&key, modifiers)),
            Command::DragStart { row, col } => {
                Outcome::DragSource(self.drag_start(Coord::new(row, col))?)
            }
            Command::DragOver { row, col } => {
                self.drag_over(Coord::new(row, col))?;
                Outcome::Done
            }
            Command::Drop { row, col } => Outcome::Swapped(self.drop(Coord::new(row, col))?),
            Command::DragEnd => {
                self.drag_end();
                Outcome::Done
            }
            Command::MergeSelected => Outcome::Merged(self.merge_selected()?),
            Command::MergeCells { cells } => Outcome::Merged(self.merge_cells(cells)?),
            Command::ClearSelection => {
                self.clear_selection();
                Outcome::Done
            }
            Command::ResizeColumn { col, width } => {
                Outcome::Changed(self.resize_column(col, width)?)
            }
            Command::ResizeRow { row, height } => Outcome::Changed(self.resize_row(row, height)?),
            Command::PointerDown { row, col } => {
                self.pointer_down(Coord::new(row, col))?;
                Outcome::Done
            }
            Command::PointerEnter { row, col } => {
                Outcome::Changed(self.pointer_move_to_cell(Coord::new(row, col))?)
            }
            Command::BeginColumnResize { col, x } => {
                self.begin_column_resize(col, x)?;
                Outcome::Done
            }
            Command::BeginRowResize { row, y } => {
                self.begin_row_resize(row, y)?;
                Outcome::Done
            }
            Command::PointerMove { x, y } => Outcome::Changed(self.pointer_move(x, y)),
            Command::PointerUp => Outcome::GestureEnded(self.pointer_up()),
        };
        Ok(outcome)
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
    fn test_parse_commands() {
        let commands = Command::parse_list(
            r#"[
                {"type": "click", "row": 1, "col": 2},
                {"type": "key", "key": "ArrowDown", "modifiers": {"ctrl": true}},
                {"type": "key", "key": "Escape"},
                {"type": "merge_cells", "cells": [{"row": 0, "col": 0}, {"row": 1, "col": 1}]},
                {"type": "pointer_up"}
            ]"#,
        )
        .unwrap();
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[0], Command::Click { row: 1, col: 2 });
        assert_eq!(
            commands[1],
            Command::Key {
                key: "ArrowDown".to_string(),
                modifiers: Modifiers::CTRL
            }
        );
        assert_eq!(commands[4], Command::PointerUp);
    }

    #[test]
    fn test_unknown_command_is_an_error() {
        assert!(Command::parse_list(r#"[{"type": "unmerge"}]"#).is_err());
    }

    #[test]
    fn test_dispatch_sequence() {
        let mut engine = SheetEngine::with_size(10, 10).unwrap();
        let outcome = engine
            .dispatch(Command::CommitEdit {
                row: 0,
                col: 0,
                text: " hi ".to_string(),
            })
            .unwrap();
        assert_eq!(outcome, Outcome::Text("hi".to_string()));

        engine.dispatch(Command::Click { row: 0, col: 0 }).unwrap();
        let outcome = engine
            .dispatch(Command::Key {
                key: "ArrowRight".to_string(),
                modifiers: Modifiers::NONE,
            })
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Key(KeyOutcome::Moved {
                from: Coord::new(0, 0),
                to: Coord::new(0, 1)
            })
        );

        let err = engine.dispatch(Command::Click { row: 10, col: 0 });
        assert!(err.is_err());
    }

    #[test]
    fn test_script_records_failures() {
        let script = Script::from_json(
            r#"{
                "config": {"rows": 4, "cols": 4},
                "commands": [
                    {"type": "click", "row": 0, "col": 0},
                    {"type": "merge_selected"},
                    {"type": "click", "row": 1, "col": 1},
                    {"type": "merge_selected"}
                ]
            }"#,
        )
        .unwrap();
        let (engine, steps) = script.run().unwrap();
        assert_eq!(steps.len(), 4);
        assert!(matches!(steps[1], Step::Err(_)));
        assert!(matches!(steps[3], Step::Ok(Outcome::Merged(_))));
        assert_eq!(engine.merges().len(), 1);
        assert_eq!(engine.cell_label(Coord::new(1, 1)).unwrap(), "A1");
    }

    #[test]
    fn test_outcome_json_shape() {
        let json = serde_json::to_value(Outcome::Changed(true)).unwrap();
        assert_eq!(json, serde_json::json!({"result": "changed", "value": true}));
        let json = serde_json::to_value(Outcome::Done).unwrap();
        assert_eq!(json, serde_json::json!({"result": "done"}));
    }
}
