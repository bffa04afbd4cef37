//! Match detection - finds runs of 3+ same-kind tiles
//!
//! The scan reports every window of three consecutive equal tiles, so a run
//! of four yields two overlapping matches and a run of five yields three.
//! [`removal_set`] collapses them back into distinct positions, which makes
//! the removed area identical to removing each maximal run once.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{Position, CELL_COUNT, GRID_SIZE, MATCH_LEN};

const SIZE: usize = GRID_SIZE as usize;

/// Upper bound on 3-windows: (SIZE - 2) per line, SIZE lines, two axes.
pub const MAX_MATCHES: usize = 2 * SIZE * (SIZE - MATCH_LEN + 1);

/// Last scan origin along a line.
const LAST_START: u8 = GRID_SIZE - MATCH_LEN as u8;

/// Three contiguous positions sharing one kind, ordered along the axis.
pub type Match = [Position; MATCH_LEN];

/// All matches on a board (stack-allocated).
pub type MatchList = ArrayVec<Match, MAX_MATCHES>;

/// Find every horizontal and vertical 3-window of equal, non-empty tiles.
///
/// Horizontal windows come first (row-major), then vertical ones. An empty
/// result means the board is settled.
pub fn find_matches(board: &Board) -> MatchList {
    let mut matches = MatchList::new();
    for axis in [Axis::Row, Axis::Column] {
        for fixed in 0..GRID_SIZE {
            for start in 0..=LAST_START {
                if let Some(window) = window_at(board, fixed, start, axis) {
                    matches.push(window);
                }
            }
        }
    }
    matches
}

/// Cheaper check when only presence matters.
pub fn has_match(board: &Board) -> bool {
    (0..GRID_SIZE).any(|fixed| {
        (0..=LAST_START).any(|start| {
            window_at(board, fixed, start, Axis::Row).is_some()
                || window_at(board, fixed, start, Axis::Column).is_some()
        })
    })
}

/// Deduplicated union of all matched positions, in row-major order.
pub fn removal_set(matches: &[Match]) -> ArrayVec<Position, CELL_COUNT> {
    let mut marked = [false; CELL_COUNT];
    for window in matches {
        for pos in window {
            marked[pos.index()] = true;
        }
    }
    Position::all().filter(|p| marked[p.index()]).collect()
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    /// `fixed` is the row, scanning across columns
    Row,
    /// `fixed` is the column, scanning down rows
    Column,
}

fn window_at(board: &Board, fixed: u8, start: u8, axis: Axis) -> Option<Match> {
    let mut window: ArrayVec<Position, MATCH_LEN> = ArrayVec::new();
    let mut kind = None;
    for step in start..start + MATCH_LEN as u8 {
        let pos = match axis {
            Axis::Row => Position::new(fixed, step),
            Axis::Column => Position::new(step, fixed),
        }
        .ok()?;
        let k = board.kind_at(pos)?;
        if *kind.get_or_insert(k) != k {
            return None;
        }
        window.push(pos);
    }
    window.into_inner().ok()
}
