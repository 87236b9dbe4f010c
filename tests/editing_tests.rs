//! Tests for the edit session and committed values.

#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use sheetgrid::editor::EditSession;
    use sheetgrid::engine::SheetEngine;
    use sheetgrid::navigation::Modifiers;
    use sheetgrid::{Coord, KeyOutcome};

    // ================================================================
    // Test helpers
    // ================================================================

    fn engine() -> SheetEngine {
        SheetEngine::with_size(40, 30).unwrap()
    }

    fn label(engine: &SheetEngine, row: u32, col: u32) -> String {
        engine.cell_label(Coord::new(row, col)).unwrap()
    }

    // ================================================================
    // Session transitions
    // ================================================================

    #[test]
    fn test_double_click_opens_with_current_label() {
        let mut engine = engine();
        assert_eq!(engine.double_click(Coord::new(2, 3)).unwrap(), "D3");
        assert_eq!(
            engine.edit_session(),
            &EditSession::Editing {
                coord: Coord::new(2, 3),
                initial: "D3".to_string()
            }
        );

        engine.commit_edit(Coord::new(2, 3), "value").unwrap();
        assert_eq!(engine.double_click(Coord::new(2, 3)).unwrap(), "value");
    }

    #[test]
    fn test_cancel_keeps_value() {
        let mut engine = engine();
        engine.commit_edit(Coord::new(0, 0), "before").unwrap();
        engine.double_click(Coord::new(0, 0)).unwrap();
        assert!(engine.cancel_edit(Coord::new(0, 0)).unwrap());
        assert_eq!(label(&engine, 0, 0), "before");
        assert!(!engine.cancel_edit(Coord::new(0, 0)).unwrap());
    }

    #[test]
    fn test_only_one_cell_edits_at_a_time() {
        let mut engine = engine();
        engine.double_click(Coord::new(0, 0)).unwrap();
        engine.double_click(Coord::new(5, 5)).unwrap();
        assert_eq!(engine.edit_session().editing(), Some(Coord::new(5, 5)));
        // The discarded session stored nothing
        assert!(engine.store().is_empty());
        // Committing the other cell still writes but leaves the open session
        engine.commit_edit(Coord::new(0, 0), "late").unwrap();
        assert_eq!(engine.edit_session().editing(), Some(Coord::new(5, 5)));
        assert_eq!(label(&engine, 0, 0), "late");
    }

    #[test]
    fn test_enter_begins_edit_on_active_cell() {
        let mut engine = engine();
        assert_eq!(
            engine.key_command("Enter", Modifiers::NONE),
            KeyOutcome::Ignored
        );
        engine.click(Coord::new(1, 0)).unwrap();
        assert_eq!(
            engine.key_command("F2", Modifiers::NONE),
            KeyOutcome::EditStarted {
                coord: Coord::new(1, 0),
                initial: "A2".to_string()
            }
        );
        assert!(engine.edit_session().is_editing(Coord::new(1, 0)));
    }

    // ================================================================
    // Committed values
    // ================================================================

    #[test]
    fn test_commit_trims_whitespace() {
        let mut engine = engine();
        engine.double_click(Coord::new(3, 3)).unwrap();
        let stored = engine.commit_edit(Coord::new(3, 3), "\t  padded text \n").unwrap();
        assert_eq!(stored, "padded text");
        assert_eq!(label(&engine, 3, 3), "padded text");
        assert_eq!(engine.edit_session(), &EditSession::Viewing);
    }

    #[test]
    fn test_commit_without_session_writes() {
        let mut engine = engine();
        engine.commit_edit(Coord::new(0, 0), "hi").unwrap();
        assert_eq!(label(&engine, 0, 0), "hi");
        assert_eq!(engine.edit_session(), &EditSession::Viewing);
    }

    #[test]
    fn test_blank_commit_is_explicitly_cleared() {
        let mut engine = engine();
        engine.commit_edit(Coord::new(4, 4), "   ").unwrap();
        assert_eq!(label(&engine, 4, 4), "");
        assert_eq!(engine.store().stored(Coord::new(4, 4)), Some(""));
        // A never-written neighbour still shows its default label
        assert_eq!(label(&engine, 4, 5), "F5");
    }

    #[test]
    fn test_recommit_overwrites() {
        let mut engine = engine();
        engine.commit_edit(Coord::new(0, 0), "one").unwrap();
        engine.commit_edit(Coord::new(0, 0), "two").unwrap();
        assert_eq!(label(&engine, 0, 0), "two");
        assert_eq!(engine.store().len(), 1);
    }

    #[test]
    fn test_edit_absorbed_cell_edits_owner() {
        let mut engine = engine();
        engine
            .merge_cells([Coord::new(0, 0), Coord::new(1, 1)])
            .unwrap();
        assert_eq!(engine.double_click(Coord::new(1, 1)).unwrap(), "A1");
        assert!(engine.edit_session().is_editing(Coord::new(0, 0)));
        engine.commit_edit(Coord::new(1, 1), "merged").unwrap();
        assert_eq!(engine.edit_session(), &EditSession::Viewing);
        assert_eq!(label(&engine, 0, 0), "merged");
        assert_eq!(label(&engine, 1, 0), "merged");
    }

    #[test]
    fn test_commit_out_of_bounds() {
        let mut engine = engine();
        assert!(engine.commit_edit(Coord::new(40, 0), "x").is_err());
        assert!(engine.store().is_empty());
    }
}
