use crate::types::{Position, UiAction};

/// Keyboard cursor over the board; always on a valid slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: Position,
}

impl Cursor {
    pub fn new(pos: Position) -> Self {
        Self { pos }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    /// Apply a movement action. Moves that would leave the board are
    /// dropped; non-movement actions return false.
    pub fn apply(&mut self, action: UiAction) -> bool {
        let Some((drow, dcol)) = action.cursor_delta() else {
            return false;
        };
        match self.pos.offset(drow, dcol) {
            Some(next) => {
                self.pos = next;
                true
            }
            None => false,
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(Position::ORIGIN)
    }
}
