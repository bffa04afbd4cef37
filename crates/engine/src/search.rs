use arrayvec::ArrayVec;

use tui_match3_core::{has_match, Board, GameSession};
use tui_match3_types::{Position, SwapOutcome, GRID_SIZE};

const SIZE: usize = GRID_SIZE as usize;

/// Distinct adjacent pairs on the grid: one rightward and one downward edge per slot.
pub const MAX_SWAP_MOVES: usize = 2 * SIZE * (SIZE - 1);

/// An adjacent pair whose swap would be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapMove {
    pub a: Position,
    pub b: Position,
}

pub type SwapMoves = ArrayVec<SwapMove, MAX_SWAP_MOVES>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintError {
    Busy,
    NoValidSwap,
}

impl HintError {
    pub fn code(self) -> &'static str {
        match self {
            HintError::Busy => "busy",
            HintError::NoValidSwap => "no_valid_swap",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            HintError::Busy => "previous turn still has unconsumed steps",
            HintError::NoValidSwap => "no swap on this board creates a match",
        }
    }
}

/// Every accepted swap, scanning row-major with the rightward edge first.
///
/// Empty slots never take part. The board itself is not modified.
pub fn find_valid_swaps(board: &Board) -> SwapMoves {
    let mut scratch = board.clone();
    let mut moves = SwapMoves::new();
    for_each_edge(board, |a, b| {
        if swap_matches(&mut scratch, a, b) {
            moves.push(SwapMove { a, b });
        }
        true
    });
    moves
}

/// First accepted swap in scan order.
pub fn hint(board: &Board) -> Option<SwapMove> {
    let mut scratch = board.clone();
    let mut found = None;
    for_each_edge(board, |a, b| {
        if swap_matches(&mut scratch, a, b) {
            found = Some(SwapMove { a, b });
            return false;
        }
        true
    });
    found
}

pub fn has_valid_swap(board: &Board) -> bool {
    hint(board).is_some()
}

/// No swap can produce a match; the board needs a shuffle.
pub fn is_stuck(board: &Board) -> bool {
    !has_valid_swap(board)
}

/// Play the hinted swap on a session.
pub fn apply_hint(session: &mut GameSession) -> Result<SwapOutcome, HintError> {
    if session.is_busy() {
        return Err(HintError::Busy);
    }
    let Some(mv) = hint(session.board()) else {
        return Err(HintError::NoValidSwap);
    };
    Ok(session.attempt_swap(mv.a, mv.b))
}

/// Visit each occupied adjacent pair once; stop when `visit` returns false.
fn for_each_edge(board: &Board, mut visit: impl FnMut(Position, Position) -> bool) {
    for a in Position::all() {
        if !board.is_occupied(a) {
            continue;
        }
        for (drow, dcol) in [(0, 1), (1, 0)] {
            let Some(b) = a.offset(drow, dcol) else {
                continue;
            };
            if board.is_occupied(b) && !visit(a, b) {
                return;
            }
        }
    }
}

fn swap_matches(scratch: &mut Board, a: Position, b: Position) -> bool {
    if scratch.kind_at(a) == scratch.kind_at(b) {
        return false;
    }
    scratch.swap(a, b);
    let matched = has_match(scratch);
    scratch.swap(b, a);
    matched
}
