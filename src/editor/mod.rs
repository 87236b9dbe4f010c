//! Per-cell edit session.
//!
//! The session is either `Viewing` or `Editing` one cell. `commit` and
//! `cancel` are the only ways out of `Editing`. The text-input overlay that
//! collects the text belongs to the renderer.

pub(crate) mod mutation;

use serde::Serialize;

use crate::types::Coord;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EditSession {
    #[default]
    Viewing,
    Editing {
        coord: Coord,
        /// Text the overlay should open with
        initial: String,
    },
}

impl EditSession {
    /// Open a session on `coord`, returning the cell whose open session was
    /// discarded, if any.
    pub fn begin(&mut self, coord: Coord, initial: String) -> Option<Coord> {
        let previous = self.editing();
        *self = Self::Editing { coord, initial };
        previous.filter(|prev| *prev != coord)
    }

    /// Close the session if it is editing `coord`. Returns whether it was.
    pub fn finish(&mut self, coord: Coord) -> bool {
        if self.is_editing(coord) {
            *self = Self::Viewing;
            true
        } else {
            false
        }
    }

    pub fn editing(&self) -> Option<Coord> {
        match self {
            Self::Viewing => None,
            Self::Editing { coord, .. } => Some(*coord),
        }
    }

    pub fn is_editing(&self, coord: Coord) -> bool {
        self.editing() == Some(coord)
    }

    pub fn initial_text(&self) -> Option<&str> {
        match self {
            Self::Viewing => None,
            Self::Editing { initial, .. } => Some(initial.as_str()),
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
    fn test_begin_and_finish() {
        let mut session = EditSession::default();
        assert_eq!(session.begin(Coord::new(1, 1), "B2".into()), None);
        assert!(session.is_editing(Coord::new(1, 1)));
        assert_eq!(session.initial_text(), Some("B2"));

        assert!(!session.finish(Coord::new(0, 0)));
        assert!(session.finish(Coord::new(1, 1)));
        assert_eq!(session, EditSession::Viewing);
    }

    #[test]
    fn test_begin_replaces_open_session() {
        let mut session = EditSession::default();
        session.begin(Coord::new(1, 1), String::new());
        assert_eq!(
            session.begin(Coord::new(2, 2), String::new()),
            Some(Coord::new(1, 1))
        );
        assert_eq!(session.begin(Coord::new(2, 2), String::new()), None);
        assert_eq!(session.editing(), Some(Coord::new(2, 2)));
    }
}
