//! Move controller - selection state machine and the swap protocol
//!
//! ```text
//! Idle --click tile--> Armed --click adjacent--> swap --match----> cascade --> Idle (busy)
//!                        |                         \--no match--> revert  --> Idle (busy)
//!                        \--click anything else--> Idle
//! ```
//!
//! A second click that is not adjacent to the armed tile, including the
//! armed tile itself, clears the selection; the click after that arms
//! afresh. Once a swap has run the controller stays busy until the session
//! has handed every step event to the presentation layer.

use tracing::debug;

use crate::board::Board;
use crate::cascade::{resolve, CascadeReport, StepSink};
use crate::matcher::has_match;
use crate::rng::SimpleRng;
use crate::types::{IgnoreReason, Position, StepEvent};

/// What a click did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    Ignored(IgnoreReason),
    /// The clicked tile is now selected.
    Armed(Position),
    /// A non-adjacent second click dropped the selection.
    Cleared,
    /// Armed tile plus an adjacent click: the caller should attempt this swap.
    SwapRequested(Position, Position),
}

/// Result of running the swap protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnResult {
    Ignored(IgnoreReason),
    /// No match; the board is back to its pre-swap layout.
    Reverted,
    Accepted(CascadeReport),
}

#[derive(Debug, Clone, Default)]
pub struct MoveController {
    selection: Option<Position>,
    busy: bool,
}

impl MoveController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<Position> {
        self.selection
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Mark the current turn as fully consumed.
    pub fn release(&mut self) {
        self.busy = false;
    }

    /// Drop any armed selection and busy state (new board).
    pub fn reset(&mut self) {
        self.selection = None;
        self.busy = false;
    }

    /// Feed one click into the selection state machine.
    pub fn click(&mut self, board: &Board, pos: Position) -> Click {
        if self.busy {
            return Click::Ignored(IgnoreReason::Busy);
        }
        if !board.is_occupied(pos) {
            return Click::Ignored(IgnoreReason::EmptySlot);
        }

        match self.selection.take() {
            None => {
                self.selection = Some(pos);
                Click::Armed(pos)
            }
            Some(armed) if Board::are_adjacent(armed, pos) => Click::SwapRequested(armed, pos),
            Some(_) => Click::Cleared,
        }
    }

    /// Swap, validate, and either cascade or revert.
    ///
    /// Clears the selection whatever the outcome. Every step is pushed to
    /// `sink`; the controller is busy afterwards unless the input was ignored.
    pub fn attempt_swap(
        &mut self,
        board: &mut Board,
        rng: &mut SimpleRng,
        a: Position,
        b: Position,
        sink: &mut impl StepSink,
    ) -> TurnResult {
        if self.busy {
            return TurnResult::Ignored(IgnoreReason::Busy);
        }
        self.selection = None;

        if !board.is_occupied(a) || !board.is_occupied(b) {
            return TurnResult::Ignored(IgnoreReason::EmptySlot);
        }
        if !Board::are_adjacent(a, b) {
            return TurnResult::Ignored(IgnoreReason::NotAdjacent);
        }

        self.busy = true;
        board.swap(a, b);
        sink.push_step(StepEvent::Swapped { a, b });

        if !has_match(board) {
            board.swap(b, a);
            sink.push_step(StepEvent::Reverted { a, b });
            debug!(?a, ?b, "swap reverted");
            return TurnResult::Reverted;
        }

        let report = resolve(board, rng, sink);
        debug!(
            ?a,
            ?b,
            steps = report.steps,
            score_delta = report.score_delta,
            "swap accepted"
        );
        TurnResult::Accepted(report)
    }
}
