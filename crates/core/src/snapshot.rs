use serde::{Deserialize, Serialize};

use crate::types::{GameStatus, Position, GRID_SIZE};

const SIZE: usize = GRID_SIZE as usize;

/// Read-only export of a session for renderers and protocol clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Tile codes per slot: 0 = empty, `kind + 1` otherwise.
    pub board: [[u8; SIZE]; SIZE],
    /// FNV-1a 64 over `board`, row-major.
    pub board_hash: u64,
    pub score: u32,
    pub moves: u32,
    pub target_score: u32,
    pub status: GameStatus,
    pub selection: Option<Position>,
    pub busy: bool,
    pub pending_steps: u32,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; SIZE]; SIZE];
        self.board_hash = fnv1a64_board(&self.board);
        self.score = 0;
        self.moves = 0;
        self.target_score = 0;
        self.status = GameStatus::Playing;
        self.selection = None;
        self.busy = false;
        self.pending_steps = 0;
        self.seed = 0;
    }

    /// Kind at a position, if the slot is occupied.
    pub fn kind_at(&self, pos: Position) -> Option<u8> {
        match self.board[pos.row() as usize][pos.col() as usize] {
            0 => None,
            code => Some(code - 1),
        }
    }

    /// Accepting input: not busy and not finished.
    pub fn playable(&self) -> bool {
        !self.busy && !self.status.is_terminal()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; SIZE]; SIZE],
            board_hash: 0,
            score: 0,
            moves: 0,
            target_score: 0,
            status: GameStatus::Playing,
            selection: None,
            busy: false,
            pending_steps: 0,
            seed: 0,
        };
        s.clear();
        s
    }
}

/// FNV-1a 64-bit over the board codes.
pub fn fnv1a64_board(board: &[[u8; SIZE]; SIZE]) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in board.iter().flat_map(|row| row.iter().copied()) {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}
