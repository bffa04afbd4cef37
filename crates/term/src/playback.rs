//! Step playback: the board as the player currently sees it.
//!
//! The session applies a whole turn at once. The front end keeps its own
//! grid, starts it from the pre-turn snapshot and applies step events one by
//! one as the pacer releases them; after `Settled` it equals the session
//! board again.

use crate::core::GameSnapshot;
use crate::types::{Position, StepEvent, GRID_SIZE};

const SIZE: usize = GRID_SIZE as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPlayback {
    grid: [[u8; SIZE]; SIZE],
    flash: Vec<Position>,
}

impl StepPlayback {
    pub fn new(snap: &GameSnapshot) -> Self {
        Self {
            grid: snap.board,
            flash: Vec::new(),
        }
    }

    /// Jump to the session's board (restart, shuffle).
    pub fn sync(&mut self, snap: &GameSnapshot) {
        self.grid = snap.board;
        self.flash.clear();
    }

    pub fn grid(&self) -> &[[u8; SIZE]; SIZE] {
        &self.grid
    }

    /// Positions removed by the most recent `Removed` step.
    pub fn flash(&self) -> &[Position] {
        &self.flash
    }

    /// Replace the snapshot's board with the displayed one.
    pub fn overlay(&self, snap: &mut GameSnapshot) {
        snap.board = self.grid;
    }

    pub fn apply(&mut self, step: &StepEvent) {
        self.flash.clear();
        match step {
            StepEvent::Swapped { a, b } | StepEvent::Reverted { a, b } => {
                let ka = self.code(*a);
                let kb = self.code(*b);
                self.set(*a, kb);
                self.set(*b, ka);
            }
            StepEvent::Removed { positions, .. } => {
                for &pos in positions {
                    self.set(pos, 0);
                }
                self.flash.extend_from_slice(positions);
            }
            StepEvent::Refilled {
                col,
                falls,
                spawned,
                ..
            } => {
                let c = *col as usize;
                // Falls are listed bottom-up, so every destination is already vacant.
                for fall in falls {
                    let (from, to) = (fall.from_row as usize, fall.to_row as usize);
                    self.grid[to][c] = self.grid[from][c];
                    self.grid[from][c] = 0;
                }
                for tile in spawned {
                    self.set(tile.position(), tile.kind + 1);
                }
            }
            StepEvent::Rerolled { tiles } => {
                for tile in tiles {
                    self.set(tile.position(), tile.kind + 1);
                }
            }
            StepEvent::Settled { .. } => {}
        }
    }

    fn code(&self, pos: Position) -> u8 {
        self.grid[pos.row() as usize][pos.col() as usize]
    }

    fn set(&mut self, pos: Position, code: u8) {
        self.grid[pos.row() as usize][pos.col() as usize] = code;
    }
}
