//! Decoding of DOM-style key names into grid commands.

use serde::{Deserialize, Serialize};

use super::Direction;

/// Modifier keys held during a keystroke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    /// Cmd on macOS
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        meta: false,
        shift: false,
        alt: false,
    };

    /// Ctrl or Cmd turns an arrow into a jump to the grid edge.
    pub fn is_extended(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A keystroke the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Move { direction: Direction, extended: bool },
    ClearSelection,
    /// Open the edit session on the active cell
    BeginEdit,
}

impl KeyCommand {
    /// Map a `KeyboardEvent.key` value plus modifiers to a command.
    ///
    /// Returns `None` for keys the engine leaves to the caller (presentation
    /// shortcuts, text input, ...).
    pub fn parse(key: &str, modifiers: Modifiers) -> Option<Self> {
        let direction = match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        };
        if let Some(direction) = direction {
            return Some(Self::Move {
                direction,
                extended: modifiers.is_extended(),
            });
        }
        match key {
            "Escape" => Some(Self::ClearSelection),
            "Enter" | "F2" if !modifiers.is_extended() => Some(Self::BeginEdit),
            _ => None,
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
    fn test_arrows() {
        assert_eq!(
            KeyCommand::parse("ArrowLeft", Modifiers::NONE),
            Some(KeyCommand::Move {
                direction: Direction::Left,
                extended: false
            })
        );
        let cmd = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert_eq!(
            KeyCommand::parse("ArrowDown", cmd),
            Some(KeyCommand::Move {
                direction: Direction::Down,
                extended: true
            })
        );
    }

    #[test]
    fn test_other_keys() {
        assert_eq!(
            KeyCommand::parse("Escape", Modifiers::NONE),
            Some(KeyCommand::ClearSelection)
        );
        assert_eq!(
            KeyCommand::parse("F2", Modifiers::NONE),
            Some(KeyCommand::BeginEdit)
        );
        assert_eq!(KeyCommand::parse("Enter", Modifiers::CTRL), None);
        // Ctrl+B is a presentation shortcut
        assert_eq!(KeyCommand::parse("b", Modifiers::CTRL), None);
        assert_eq!(KeyCommand::parse("x", Modifiers::NONE), None);
    }
}
