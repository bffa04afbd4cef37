//! Move search over a board.
//!
//! Finds the swaps that would be accepted, which the front ends use for
//! hints, stuck-board detection and the `play_hint` command.

pub mod search;

pub use search::{
    apply_hint, find_valid_swaps, has_valid_swap, hint, is_stuck, HintError, SwapMove, SwapMoves,
    MAX_SWAP_MOVES,
};
