//! Board module - manages the tile grid
//!
//! The board is an 8x8 grid where each slot is empty or holds one tile.
//! Uses a flat array for cache locality and zero-allocation mutation.
//! Coordinates: (row, col) with row 0 at the top; tiles fall toward row 7.
//!
//! The board only provides primitives (swap, remove, compact). Deciding
//! whether a swap is legal belongs to the controller, and sequencing the
//! remove/compact cycle belongs to the cascade resolver.

use arrayvec::ArrayVec;
use tracing::{trace, warn};

use crate::matcher::{find_matches, removal_set};
use crate::rng::SimpleRng;
use crate::types::{Cell, Fall, Position, Tile, CELL_COUNT, GRID_SIZE, INIT_REROLL_PASSES, TILE_KINDS};

const SIZE: usize = GRID_SIZE as usize;

/// Result of compacting one column: tiles that fell and tiles that spawned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRefill {
    pub falls: ArrayVec<Fall, SIZE>,
    /// New tiles, top to bottom.
    pub spawned: ArrayVec<Tile, SIZE>,
}

impl ColumnRefill {
    pub fn is_empty(&self) -> bool {
        self.falls.is_empty() && self.spawned.is_empty()
    }
}

/// The game board - 8 x 8 slots using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of slots, row-major order (row * GRID_SIZE + col)
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create a board with every slot empty
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    /// Create a fully populated, match-free board
    pub fn initialized(rng: &mut SimpleRng) -> Self {
        let mut board = Self::new();
        board.initialize(rng);
        board
    }

    /// Build a board from an explicit grid of kinds (row-major).
    ///
    /// Kinds outside the palette are wrapped into it. The result may contain
    /// matches; this is meant for scripted scenarios and tests.
    pub fn from_kinds(kinds: [[u8; SIZE]; SIZE]) -> Self {
        let mut board = Self::new();
        for pos in Position::all() {
            let kind = kinds[pos.row() as usize][pos.col() as usize] % TILE_KINDS;
            board.cells[pos.index()] = Some(Tile::new(kind, pos));
        }
        board
    }

    /// Fill every slot with a random tile, then re-roll matched tiles until
    /// the board is match-free.
    ///
    /// After `INIT_REROLL_PASSES` random passes the remaining matched tiles
    /// are re-rolled with [`Board::safe_kind`], which settles in one pass.
    /// Returns the number of random re-roll passes used.
    pub fn initialize(&mut self, rng: &mut SimpleRng) -> u32 {
        self.initialize_with_passes(rng, INIT_REROLL_PASSES)
    }

    /// [`Board::initialize`] with an explicit cap on random re-roll passes.
    pub fn initialize_with_passes(&mut self, rng: &mut SimpleRng, max_passes: u32) -> u32 {
        for pos in Position::all() {
            self.cells[pos.index()] = Some(Self::generate_tile(rng, pos));
        }

        let mut passes = 0;
        loop {
            let matches = find_matches(self);
            if matches.is_empty() {
                break;
            }
            let offending = removal_set(&matches);
            if passes >= max_passes {
                warn!(passes, remaining = offending.len(), "init re-roll cap reached");
                self.break_matches(rng, &offending);
                break;
            }
            for &pos in &offending {
                self.cells[pos.index()] = Some(Self::generate_tile(rng, pos));
            }
            passes += 1;
        }

        trace!(passes, "board initialized");
        passes
    }

    /// A new tile of uniformly random kind at `pos`
    pub fn generate_tile(rng: &mut SimpleRng, pos: Position) -> Tile {
        Tile::new(rng.next_kind(), pos)
    }

    /// True iff the positions are orthogonal neighbours.
    pub fn are_adjacent(a: Position, b: Position) -> bool {
        a.is_adjacent(b)
    }

    /// Get the slot at `pos`
    #[inline(always)]
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// Kind of the tile at `pos`, if any
    #[inline(always)]
    pub fn kind_at(&self, pos: Position) -> Option<u8> {
        self.cells[pos.index()].map(|t| t.kind)
    }

    /// Check if the slot holds a tile
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cells[pos.index()].is_some()
    }

    /// Put a tile of `kind` at `pos`, or empty the slot with `None`.
    pub fn set_kind(&mut self, pos: Position, kind: Option<u8>) {
        self.cells[pos.index()] = kind.map(|k| Tile::new(k % TILE_KINDS, pos));
    }

    /// Exchange two slots, rewriting each moved tile's coordinates.
    ///
    /// No validation: legality is decided by the caller.
    pub fn swap(&mut self, a: Position, b: Position) {
        let (ia, ib) = (a.index(), b.index());
        self.cells.swap(ia, ib);
        Self::relocate(&mut self.cells[ia], a);
        Self::relocate(&mut self.cells[ib], b);
    }

    /// Empty each listed slot.
    ///
    /// Returns how many slots actually held a tile, so duplicate positions
    /// (overlapping matches) are counted once.
    pub fn remove_at(&mut self, positions: &[Position]) -> u32 {
        let mut removed = 0;
        for &pos in positions {
            if self.cells[pos.index()].take().is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Let tiles in `col` fall into the gaps below them, then fill the empty
    /// slots left at the top with new tiles.
    ///
    /// Uses a bottom-up two-pointer pass; relative order is preserved.
    pub fn compact_column(&mut self, rng: &mut SimpleRng, col: u8) -> ColumnRefill {
        let mut out = ColumnRefill::default();
        let column = Self::column(col);
        if column.is_empty() {
            return out;
        }

        let mut write_row = SIZE;
        for read_row in (0..SIZE).rev() {
            let read = column[read_row].index();
            if self.cells[read].is_none() {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let target = column[write_row];
                let mut tile = self.cells[read].take();
                Self::relocate(&mut tile, target);
                self.cells[target.index()] = tile;
                out.falls.push(Fall {
                    col,
                    from_row: read_row as u8,
                    to_row: write_row as u8,
                });
            }
        }

        for &pos in &column[..write_row] {
            let tile = Self::generate_tile(rng, pos);
            self.cells[pos.index()] = Some(tile);
            out.spawned.push(tile);
        }

        out
    }

    /// Pick a kind for `pos` that differs from every orthogonal neighbour.
    ///
    /// A tile can only extend a run through an equal neighbour, so the
    /// result can never take part in a match. At most 4 of the 6 kinds are
    /// excluded, so a candidate always exists.
    pub fn safe_kind(&self, rng: &mut SimpleRng, pos: Position) -> u8 {
        let mut candidates: ArrayVec<u8, { TILE_KINDS as usize }> = ArrayVec::new();
        for kind in 0..TILE_KINDS {
            if pos.neighbors().all(|n| self.kind_at(n) != Some(kind)) {
                candidates.push(kind);
            }
        }
        rng.pick(&candidates).unwrap_or_else(|| rng.next_kind())
    }

    /// Re-roll each listed tile in place with [`Board::safe_kind`].
    ///
    /// When `positions` covers every tile of every run, the board is
    /// match-free afterwards. Returns the re-rolled tiles.
    pub fn break_matches(&mut self, rng: &mut SimpleRng, positions: &[Position]) -> Vec<Tile> {
        let mut tiles = Vec::with_capacity(positions.len());
        for &pos in positions {
            let tile = Tile::new(self.safe_kind(rng, pos), pos);
            self.cells[pos.index()] = Some(tile);
            tiles.push(tile);
        }
        tiles
    }

    /// True when no slot is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Write the board as `u8` codes: 0 = empty, `kind + 1` otherwise.
    pub fn write_u8_grid(&self, out: &mut [[u8; SIZE]; SIZE]) {
        for pos in Position::all() {
            out[pos.row() as usize][pos.col() as usize] =
                self.kind_at(pos).map(|k| k + 1).unwrap_or(0);
        }
    }

    /// Render kinds as text rows (`.` for empty), mostly for logs and test failures.
    pub fn to_text(&self) -> String {
        let mut s = String::with_capacity(CELL_COUNT + SIZE);
        for pos in Position::all() {
            match self.get(pos) {
                Some(t) => s.push(char::from(b'0' + t.kind)),
                None => s.push('.'),
            }
            if pos.col() + 1 == GRID_SIZE {
                s.push('\n');
            }
        }
        s
    }

    /// Positions of one column, top to bottom. Empty when `col` is off the board.
    fn column(col: u8) -> ArrayVec<Position, SIZE> {
        (0..GRID_SIZE)
            .filter_map(|row| Position::new(row, col).ok())
            .collect()
    }

    fn relocate(cell: &mut Cell, pos: Position) {
        if let Some(tile) = cell.as_mut() {
            tile.row = pos.row();
            tile.col = pos.col();
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
