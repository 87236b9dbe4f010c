//! The engine context: one object owning every piece of interaction state.
//!
//! All command handlers take `&mut SheetEngine`; there is no free-standing
//! mutable state. Commands are processed one at a time to completion. The
//! renderer queries the engine after each mutation.
//!
//! Every read and write through the engine resolves absorbed coordinates to
//! their merge owner first.

mod command;
mod events;

pub use command::{CellEntry, Command, Outcome, Script, Snapshot, Step};
pub use events::KeyOutcome;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::cell_ref::parse_cell_ref;
use crate::config::GridConfig;
use crate::drag::DragSwapController;
use crate::editor::mutation::apply_cell_edit;
use crate::editor::EditSession;
use crate::error::{GridError, Result};
use crate::layout::{scroll_target, CellBox, ScrollOffset, SheetLayout, Viewport};
use crate::merge::MergeRegionTracker;
use crate::navigation::NavigationEngine;
use crate::selection::SelectionModel;
use crate::store::CellStore;
use crate::types::{Coord, GridSize, MergeRegion, SelectionRange};

/// The modal pointer gesture currently running. Only one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GestureMode {
    #[default]
    Idle,
    RangeSelect {
        anchor: Coord,
    },
    DragSwap {
        source: Coord,
    },
    ColumnResize {
        col: u32,
        origin_x: f32,
        origin_width: f32,
    },
    RowResize {
        row: u32,
        origin_y: f32,
        origin_height: f32,
    },
}

impl GestureMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::RangeSelect { .. } => "range_select",
            Self::DragSwap { .. } => "drag_swap",
            Self::ColumnResize { .. } => "column_resize",
            Self::RowResize { .. } => "row_resize",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

#[derive(Debug, Clone)]
pub struct SheetEngine {
    config: GridConfig,
    store: CellStore,
    merges: MergeRegionTracker,
    selection: SelectionModel,
    navigation: NavigationEngine,
    drag: DragSwapController,
    edit: EditSession,
    layout: SheetLayout,
    gesture: GestureMode,
}

impl SheetEngine {
    /// Create an engine for a validated config.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the config fails validation.
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        let size = config.size();
        tracing::debug!(%size, origin = ?config.row_label_origin, "grid created");
        Ok(Self {
            store: CellStore::new(size, config.row_label_origin),
            merges: MergeRegionTracker::new(size),
            selection: SelectionModel::new(),
            navigation: NavigationEngine::new(size),
            drag: DragSwapController::new(),
            edit: EditSession::default(),
            layout: SheetLayout::new(&config),
            gesture: GestureMode::Idle,
            config,
        })
    }

    /// Engine for a `rows x cols` grid with default settings.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for an empty grid.
    pub fn with_size(rows: u32, cols: u32) -> Result<Self> {
        Self::new(GridConfig::with_size(rows, cols))
    }

    pub fn size(&self) -> GridSize {
        self.config.size()
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn store(&self) -> &CellStore {
        &self.store
    }

    pub fn merges(&self) -> &MergeRegionTracker {
        &self.merges
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    pub fn edit_session(&self) -> &EditSession {
        &self.edit
    }

    pub fn gesture(&self) -> GestureMode {
        self.gesture
    }

    /// Bounds-check then resolve to the merge owner.
    fn target(&self, coord: Coord) -> Result<Coord> {
        let size = self.size();
        if !size.contains(coord) {
            return Err(GridError::OutOfBounds { coord, size });
        }
        Ok(self.merges.resolve(coord))
    }

    /// Parse an A1-style reference using this grid's row-label origin.
    ///
    /// # Errors
    /// `InvalidCellRef` for malformed text, `OutOfBounds` past the grid.
    pub fn parse_ref(&self, reference: &str) -> Result<Coord> {
        let coord = parse_cell_ref(reference, self.config.row_label_origin)
            .ok_or_else(|| GridError::InvalidCellRef(reference.to_string()))?;
        let size = self.size();
        if size.contains(coord) {
            Ok(coord)
        } else {
            Err(GridError::OutOfBounds { coord, size })
        }
    }

    // ---- Renderer queries ----

    /// Stored value or default label, read through the merge owner.
    ///
    /// # Errors
    /// Returns `OutOfBounds` outside the grid.
    pub fn cell_label(&self, coord: Coord) -> Result<String> {
        let owner = self.target(coord)?;
        Ok(self.store.get(owner)?.into_owned())
    }

    pub fn is_selected(&self, coord: Coord) -> bool {
        self.selection.is_selected(coord)
    }

    pub fn is_active(&self, coord: Coord) -> bool {
        self.selection.is_active(coord)
    }

    pub fn active(&self) -> Option<Coord> {
        self.selection.active()
    }

    pub fn selected(&self) -> BTreeSet<Coord> {
        self.selection.selected()
    }

    pub fn selection_range(&self) -> Option<SelectionRange> {
        self.selection.range()
    }

    pub fn merge_region_for(&self, coord: Coord) -> Option<MergeRegion> {
        self.merges.region_for(coord).copied()
    }

    /// True if the renderer should hide this cell (absorbed by a merge).
    pub fn is_absorbed(&self, coord: Coord) -> bool {
        self.merges.is_absorbed(coord)
    }

    pub fn drag_source(&self) -> Option<Coord> {
        self.drag.source()
    }

    pub fn drag_hover(&self) -> Option<Coord> {
        self.drag.hover()
    }

    /// Pixel box of `coord`; a merged cell reports its whole region.
    ///
    /// # Errors
    /// Returns `OutOfBounds` outside the grid.
    pub fn cell_box(&self, coord: Coord) -> Result<CellBox> {
        let size = self.size();
        self.layout
            .cell_box(coord, self.merges.region_for(coord))
            .ok_or(GridError::OutOfBounds { coord, size })
    }

    /// Scroll offsets that bring `coord` fully into `viewport`.
    ///
    /// # Errors
    /// Returns `OutOfBounds` outside the grid.
    pub fn scroll_target_for(&self, coord: Coord, viewport: &Viewport) -> Result<ScrollOffset> {
        let cell = self.cell_box(coord)?;
        Ok(scroll_target(&cell, viewport))
    }

    /// Viewport with this grid's sticky header bands.
    pub fn viewport(&self, width: f32, height: f32) -> Viewport {
        Viewport::new(width, height)
            .with_sticky(self.config.row_header_width, self.config.col_header_height)
    }

    /// Hit-test a content point, resolved to the merge owner.
    pub fn cell_at_point(&self, x: f32, y: f32) -> Option<Coord> {
        self.layout
            .cell_at_point(x, y)
            .map(|coord| self.merges.resolve(coord))
    }

    // ---- Commands ----

    /// Focus a cell and toggle it in the selected set.
    /// Returns whether the cell is selected afterwards.
    ///
    /// # Errors
    /// Returns `OutOfBounds` outside the grid.
    pub fn click(&mut self, coord: Coord) -> Result<bool> {
        let owner = self.target(coord)?;
        self.focus(owner);
        let selected = self.selection.toggle_select(owner);
        tracing::debug!(cell = %owner, selected, "click");
        Ok(selected)
    }

    fn focus(&mut self, coord: Coord) {
        let previous = self.selection.set_active(coord);
        if previous != Some(coord) {
            tracing::debug!(from = ?previous, to = %coord, "active cell changed");
        }
    }

    /// Begin editing a cell. Returns the text the editor should open with.
    ///
    /// # Errors
    /// Returns `OutOfBounds` outside the grid.
    pub fn double_click(&mut self, coord: Coord) -> Result<String> {
        let owner = self.target(coord)?;
        self.begin_edit(owner)
    }

    fn begin_edit(&mut self, owner: Coord) -> Result<String> {
        let initial = self.store.get(owner)?.into_owned();
        self.focus(owner);
        if let Some(discarded) = self.edit.begin(owner, initial.clone()) {
            tracing::debug!(cell = %discarded, "open edit discarded");
        }
        tracing::debug!(cell = %owner, "edit started");
        Ok(initial)
    }

    /// Store edited text (trimmed) and close the cell's edit session if open.
    /// Returns the stored value.
    ///
    /// # Errors
    /// Returns `OutOfBounds` outside the grid.
    pub fn commit_edit(&mut self, coord: Coord, text: &str) -> Result<String> {
        let owner = self.target(coord)?;
        let value = apply_cell_edit(&mut self.store, owner, text)?;
        self.edit.finish(owner);
        tracing::debug!(cell = %owner, "edit committed");
        Ok(value)
    }

    /// Close the cell's edit session without storing anything.
    /// Returns whether a session was open on it.
    ///
    /// # Errors
    /// Returns `OutOfBounds` outside the grid.
    pub fn cancel_edit(&mut self, coord: Coord) -> Result<bool> {
        let owner = self.target(coord)?;
        let closed = self.edit.finish(owner);
        if closed {
            tracing::debug!(cell = %owner, "edit cancelled");
        }
        Ok(closed)
    }

    /// Merge every selected cell's bounding rectangle, then clear the selection.
    ///
    /// # Errors
    /// `TooFewCells` or `OverlapConflict`; the selection is kept on error.
    pub fn merge_selected(&mut self) -> Result<MergeRegion> {
        let region = self.merge_cells(self.selection.selected())?;
        self.selection.clear();
        Ok(region)
    }

    /// Merge the bounding rectangle of `coords`. The active cell, selected
    /// cells and a pending drag pick-up move to the owner if the merge
    /// absorbed them.
    ///
    /// # Errors
    /// `TooFewCells`, `OutOfBounds` or `OverlapConflict`, with no mutation.
    pub fn merge_cells<I>(&mut self, coords: I) -> Result<MergeRegion>
    where
        I: IntoIterator<Item = Coord>,
    {
        let region = self.merges.merge(coords)?;
        self.selection.rehome(&region);
        self.drag.rehome(&region);
        if let GestureMode::DragSwap { source } = &mut self.gesture {
            if region.absorbs(*source) {
                *source = region.owner();
            }
        }
        if let Some(active) = self.selection.active() {
            if region.absorbs(active) {
                self.focus(region.owner());
            }
        }
        if let Some(editing) = self.edit.editing() {
            if region.absorbs(editing) {
                self.edit.finish(editing);
            }
        }
        Ok(region)
    }

    /// Empty the selected set. The active cell stays.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        tracing::debug!("selection cleared");
    }

    /// Set a column width directly. Ignored unless wider than the minimum.
    ///
    /// # Errors
    /// Returns `OutOfBounds` for a column past the grid.
    pub fn resize_column(&mut self, col: u32, width: f32) -> Result<bool> {
        let size = self.size();
        if col >= size.cols {
            return Err(GridError::OutOfBounds {
                coord: Coord::new(0, col),
                size,
            });
        }
        let applied = self.layout.resize_column(col, width);
        tracing::trace!(col, width, applied, "resize column");
        Ok(applied)
    }

    /// Set a row height directly. Ignored unless taller than the minimum.
    ///
    /// # Errors
    /// Returns `OutOfBounds` for a row past the grid.
    pub fn resize_row(&mut self, row: u32, height: f32) -> Result<bool> {
        let size = self.size();
        if row >= size.rows {
            return Err(GridError::OutOfBounds {
                coord: Coord::new(row, 0),
                size,
            });
        }
        let applied = self.layout.resize_row(row, height);
        tracing::trace!(row, height, applied, "resize row");
        Ok(applied)
    }

    /// Values, focus, selection and merges in a serializable form.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            size: self.size(),
            cells: self
                .store
                .entries()
                .into_iter()
                .map(|(coord, value)| CellEntry {
                    row: coord.row,
                    col: coord.col,
                    value: value.to_string(),
                })
                .collect(),
            active: self.selection.active(),
            selected: self.selection.selected().into_iter().collect(),
            merges: self.merges.regions().to_vec(),
            editing: self.edit.editing(),
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
        SheetEngine::with_size(40, 30).unwrap()
    }

    #[test]
    fn test_default_labels_and_commit() {
        let mut engine = engine();
        assert_eq!(engine.cell_label(Coord::new(0, 0)).unwrap(), "A1");
        engine.commit_edit(Coord::new(0, 0), "hi").unwrap();
        assert_eq!(engine.cell_label(Coord::new(0, 0)).unwrap(), "hi");
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(matches!(
            SheetEngine::with_size(0, 5),
            Err(GridError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_click_focuses_and_toggles() {
        let mut engine = engine();
        assert!(engine.click(Coord::new(2, 3)).unwrap());
        assert!(engine.is_active(Coord::new(2, 3)));
        assert!(engine.is_selected(Coord::new(2, 3)));
        assert!(!engine.click(Coord::new(2, 3)).unwrap());
        assert!(engine.is_active(Coord::new(2, 3)));
        assert!(!engine.is_selected(Coord::new(2, 3)));
    }

    #[test]
    fn test_out_of_bounds_commands() {
        let mut engine = engine();
        assert!(matches!(
            engine.click(Coord::new(40, 0)),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(engine.commit_edit(Coord::new(0, 30), "x").is_err());
        assert!(engine.resize_column(30, 100.0).is_err());
        assert!(engine.store().is_empty());
        assert_eq!(engine.active(), None);
    }

    #[test]
    fn test_edit_session_lifecycle() {
        let mut engine = engine();
        assert_eq!(engine.double_click(Coord::new(1, 1)).unwrap(), "B2");
        assert_eq!(engine.edit_session().editing(), Some(Coord::new(1, 1)));
        assert!(engine.is_active(Coord::new(1, 1)));

        assert!(engine.cancel_edit(Coord::new(1, 1)).unwrap());
        assert_eq!(engine.edit_session(), &EditSession::Viewing);
        assert_eq!(engine.cell_label(Coord::new(1, 1)).unwrap(), "B2");

        engine.double_click(Coord::new(1, 1)).unwrap();
        engine.commit_edit(Coord::new(1, 1), "  done ").unwrap();
        assert_eq!(engine.edit_session(), &EditSession::Viewing);
        assert_eq!(engine.cell_label(Coord::new(1, 1)).unwrap(), "done");
    }

    #[test]
    fn test_merge_selected_clears_selection() {
        let mut engine = engine();
        engine.click(Coord::new(0, 0)).unwrap();
        engine.click(Coord::new(1, 1)).unwrap();
        let region = engine.merge_selected().unwrap();
        assert_eq!(region.bottom_right, Coord::new(1, 1));
        assert!(engine.selected().is_empty());
        // Active (1, 1) was absorbed and moved to the owner
        assert_eq!(engine.active(), Some(Coord::new(0, 0)));
    }

    #[test]
    fn test_merge_selected_too_few_keeps_selection() {
        let mut engine = engine();
        engine.click(Coord::new(4, 4)).unwrap();
        assert!(matches!(
            engine.merge_selected(),
            Err(GridError::TooFewCells { count: 1 })
        ));
        assert!(engine.is_selected(Coord::new(4, 4)));
        assert!(engine.merges().is_empty());
    }

    #[test]
    fn test_reads_and_writes_go_to_owner() {
        let mut engine = engine();
        engine.commit_edit(Coord::new(0, 0), "owner").unwrap();
        engine
            .merge_cells([Coord::new(0, 0), Coord::new(1, 1)])
            .unwrap();
        assert_eq!(engine.cell_label(Coord::new(1, 1)).unwrap(), "owner");
        engine.commit_edit(Coord::new(1, 0), "via absorbed").unwrap();
        assert_eq!(engine.cell_label(Coord::new(0, 0)).unwrap(), "via absorbed");
        assert_eq!(engine.store().stored(Coord::new(1, 0)), None);
        assert!(engine.is_absorbed(Coord::new(0, 1)));
    }

    #[test]
    fn test_scroll_target_uses_layout() {
        let engine = engine();
        let viewport = engine.viewport(400.0, 200.0);
        // Row 20 starts at 20 + 20 * 20 = 420, ends at 440
        let target = engine
            .scroll_target_for(Coord::new(20, 0), &viewport)
            .unwrap();
        assert_eq!(target.left, 0.0);
        assert_eq!(target.top, 240.0);
    }

    #[test]
    fn test_snapshot() {
        let mut engine = engine();
        engine.commit_edit(Coord::new(3, 0), "x").unwrap();
        engine.click(Coord::new(2, 2)).unwrap();
        let snap = engine.snapshot();
        assert_eq!(snap.cells.len(), 1);
        assert_eq!(snap.cells[0].value, "x");
        assert_eq!(snap.active, Some(Coord::new(2, 2)));
        assert_eq!(snap.selected, vec![Coord::new(2, 2)]);
    }
}
