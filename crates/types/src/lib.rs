//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no game logic attached, making them usable in
//! any context (core engine, terminal rendering, JSON pipe protocol).
//!
//! # Board Dimensions
//!
//! The playfield is a square grid:
//!
//! - **Size**: 8 x 8 slots, rows indexed 0-7 top to bottom, columns 0-7 left to right
//! - **Palette**: 6 tile kinds, numbered 0-5
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TILE_REWARD` | 10 | Points per distinct removed tile |
//! | `DEFAULT_MOVES` | 30 | Move budget for a new session |
//! | `DEFAULT_TARGET_SCORE` | 1000 | Score needed to win |
//! | `INIT_REROLL_PASSES` | 64 | Random re-roll passes before falling back to safe generation |
//! | `MAX_CASCADE_STEPS` | 32 | Cascade iterations before matches are broken in place |
//! | `DEFAULT_PACE_MS` | 120 | Delay between step events in the terminal front end |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{Position, UiAction, GRID_SIZE};
//!
//! let a = Position::new(3, 1).unwrap();
//! let b = Position::new(4, 1).unwrap();
//! assert!(a.is_adjacent(b));
//! assert_eq!(a.index(), 3 * GRID_SIZE as usize + 1);
//!
//! assert!(Position::new(8, 0).is_err());
//!
//! assert_eq!(UiAction::from_str("select"), Some(UiAction::Select));
//! ```

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Board side length in slots (8 x 8)
pub const GRID_SIZE: u8 = 8;

/// Total number of slots on the board
pub const CELL_COUNT: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Number of distinct tile kinds in the palette
pub const TILE_KINDS: u8 = 6;

/// Minimum run length that counts as a match
pub const MATCH_LEN: usize = 3;

/// Points awarded per distinct removed tile
pub const TILE_REWARD: u32 = 10;

/// Move budget for a new session
pub const DEFAULT_MOVES: u32 = 30;

/// Score needed to win a session
pub const DEFAULT_TARGET_SCORE: u32 = 1000;

/// Random re-roll passes during board initialization before the
/// non-matching fallback kicks in.
pub const INIT_REROLL_PASSES: u32 = 64;

/// Remove/compact/refill iterations allowed in a single cascade.
pub const MAX_CASCADE_STEPS: u32 = 32;

/// Delay between step events when the terminal front end paces a turn.
pub const DEFAULT_PACE_MS: u32 = 120;

/// Errors surfaced by the engine boundary.
///
/// Gameplay misuse (empty slots, non-adjacent swaps, input while busy) is
/// never an error; it is reported as an ignored outcome instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    #[display("invalid position ({row}, {col}): outside the 8x8 board")]
    InvalidPosition { row: i64, col: i64 },
}

/// A slot coordinate, always within `[0, GRID_SIZE)` on both axes.
///
/// Fields are private so an out-of-range position cannot be constructed;
/// deserialization goes through the same bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    row: u8,
    col: u8,
}

#[derive(Deserialize)]
struct RawPosition {
    row: i64,
    col: i64,
}

impl TryFrom<RawPosition> for Position {
    type Error = EngineError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::from_signed(raw.row, raw.col)
    }
}

impl Position {
    /// Top-left slot.
    pub const ORIGIN: Position = Position { row: 0, col: 0 };

    #[inline(always)]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline(always)]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Build a position, rejecting coordinates outside the board.
    pub fn new(row: u8, col: u8) -> Result<Self, EngineError> {
        Self::from_signed(row as i64, col as i64)
    }

    /// Build a position from untrusted signed coordinates (protocol / UI input).
    pub fn from_signed(row: i64, col: i64) -> Result<Self, EngineError> {
        let size = GRID_SIZE as i64;
        if !(0..size).contains(&row) || !(0..size).contains(&col) {
            return Err(EngineError::InvalidPosition { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Flat row-major index into a board array.
    #[inline(always)]
    pub const fn index(self) -> usize {
        (self.row as usize) * (GRID_SIZE as usize) + (self.col as usize)
    }

    /// Inverse of [`Position::index`].
    pub fn from_index(idx: usize) -> Option<Self> {
        if idx >= CELL_COUNT {
            return None;
        }
        Some(Self {
            row: (idx / GRID_SIZE as usize) as u8,
            col: (idx % GRID_SIZE as usize) as u8,
        })
    }

    /// Manhattan distance between two positions.
    pub fn distance(self, other: Position) -> u8 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Orthogonally adjacent (no diagonals).
    pub fn is_adjacent(self, other: Position) -> bool {
        self.distance(other) == 1
    }

    /// Offset by (drow, dcol), or None when it would leave the board.
    pub fn offset(self, drow: i8, dcol: i8) -> Option<Position> {
        Position::from_signed(self.row as i64 + drow as i64, self.col as i64 + dcol as i64).ok()
    }

    /// The up-to-four orthogonal neighbours that lie on the board.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        [(-1i8, 0i8), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }

    /// Iterate all board positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).filter_map(Position::from_index)
    }
}

/// Special-variant tag carried by the tile schema.
///
/// Reserved for future mechanics: nothing in the engine assigns or reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialKind {
    Row,
    Column,
    Bomb,
    Rainbow,
}

/// One tile occupying a board slot.
///
/// `row`/`col` always mirror the slot the tile sits in; the board rewrites
/// them on every swap and fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Kind id in `[0, TILE_KINDS)`
    pub kind: u8,
    pub row: u8,
    pub col: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<SpecialKind>,
}

impl Tile {
    pub fn new(kind: u8, pos: Position) -> Self {
        Self {
            kind,
            row: pos.row,
            col: pos.col,
            special: None,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            row: self.row,
            col: self.col,
        }
    }
}

/// A board slot
///
/// - `None`: Empty slot (only observable mid-cascade)
/// - `Some(Tile)`: Slot holding a tile
pub type Cell = Option<Tile>;

/// A tile moving down within one column during compaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fall {
    pub col: u8,
    pub from_row: u8,
    pub to_row: u8,
}

/// Discrete board transition emitted by the engine.
///
/// A turn produces an ordered sequence of these; presentation layers replay
/// them at their own pace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StepEvent {
    /// Two tiles exchanged slots.
    Swapped { a: Position, b: Position },
    /// A no-match swap was undone.
    Reverted { a: Position, b: Position },
    /// Matched tiles removed during cascade step `step` (1-based).
    Removed {
        step: u32,
        positions: Vec<Position>,
        score_delta: u32,
    },
    /// One column compacted: tiles fell, then new tiles spawned at the top.
    Refilled {
        step: u32,
        col: u8,
        falls: Vec<Fall>,
        spawned: Vec<Tile>,
    },
    /// Tiles re-rolled in place to break leftover matches (no score).
    Rerolled { tiles: Vec<Tile> },
    /// The cascade settled after `steps` remove cycles.
    Settled { steps: u32 },
}

/// Why a swap or click was dropped without touching the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// A previous turn's steps have not been consumed yet.
    Busy,
    EmptySlot,
    NotAdjacent,
}

/// Result class of a swap attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapStatus {
    /// The swap produced a match and was committed.
    Accepted,
    /// The swap produced no match and was undone.
    Reverted,
    /// Input was rejected before the board was touched.
    Ignored(IgnoreReason),
}

/// Aggregate outcome of one swap attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapOutcome {
    pub status: SwapStatus,
    pub score_delta: u32,
    pub moves_remaining: u32,
    /// Number of remove cycles the cascade ran.
    pub cascades: u32,
}

impl SwapOutcome {
    pub fn ignored(reason: IgnoreReason, moves_remaining: u32) -> Self {
        Self {
            status: SwapStatus::Ignored(reason),
            score_delta: 0,
            moves_remaining,
            cascades: 0,
        }
    }

    pub fn accepted(&self) -> bool {
        self.status == SwapStatus::Accepted
    }
}

/// Session progress as seen by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    /// Derive status from the move budget and score.
    ///
    /// Terminal only once the move budget is spent.
    pub fn evaluate(moves: u32, score: u32, target_score: u32) -> Self {
        if moves > 0 {
            GameStatus::Playing
        } else if score >= target_score {
            GameStatus::Won
        } else {
            GameStatus::Lost
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }
}

/// Front-end actions produced by input handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    /// Click the slot under the cursor
    Select,
    Hint,
    Shuffle,
    Restart,
}

impl UiAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::UiAction;
    ///
    /// assert_eq!(UiAction::from_str("cursorUp"), Some(UiAction::CursorUp));
    /// assert_eq!(UiAction::from_str("HINT"), Some(UiAction::Hint));
    /// assert_eq!(UiAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorup" => Some(UiAction::CursorUp),
            "cursordown" => Some(UiAction::CursorDown),
            "cursorleft" => Some(UiAction::CursorLeft),
            "cursorright" => Some(UiAction::CursorRight),
            "select" => Some(UiAction::Select),
            "hint" => Some(UiAction::Hint),
            "shuffle" => Some(UiAction::Shuffle),
            "restart" => Some(UiAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            UiAction::CursorUp => "cursorUp",
            UiAction::CursorDown => "cursorDown",
            UiAction::CursorLeft => "cursorLeft",
            UiAction::CursorRight => "cursorRight",
            UiAction::Select => "select",
            UiAction::Hint => "hint",
            UiAction::Shuffle => "shuffle",
            UiAction::Restart => "restart",
        }
    }

    /// Cursor delta as (drow, dcol) for movement actions.
    pub fn cursor_delta(&self) -> Option<(i8, i8)> {
        match self {
            UiAction::CursorUp => Some((-1, 0)),
            UiAction::CursorDown => Some((1, 0)),
            UiAction::CursorLeft => Some((0, -1)),
            UiAction::CursorRight => Some((0, 1)),
            _ => None,
        }
    }
}
