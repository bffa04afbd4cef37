//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the board model, match detection, the cascade loop and
//! the swap protocol. It has **no dependencies** on terminal I/O or protocols:
//!
//! - **Deterministic**: Same seed produces identical boards and refills
//! - **Testable**: Boards can be built from explicit kind grids
//! - **Event-driven**: Every board mutation of a turn is reported as a [`StepEvent`]
//! - **Fast**: Match scans and compaction use fixed-size stack buffers
//!
//! # Module Structure
//!
//! - [`board`]: 8x8 slot grid, tile generation, swap/remove/compact primitives
//! - [`matcher`]: horizontal and vertical run detection
//! - [`cascade`]: remove -> compact -> refill loop until the board settles
//! - [`controller`]: selection state machine and swap/validate/revert protocol
//! - [`session`]: score/moves bookkeeping and the step-event queue
//! - [`rng`]: seedable LCG used for tile generation
//! - [`config`]: session configuration (defaults + environment)
//! - [`snapshot`]: read-only state export for renderers and protocols
//!
//! # Game Rules
//!
//! - Swapping two orthogonally adjacent tiles is kept only if it creates a run of 3+
//! - Every distinct removed tile scores [`TILE_REWARD`](types::TILE_REWARD) points
//! - Tiles fall to fill gaps; new tiles spawn at the top of each column
//! - The cascade repeats until no runs remain
//! - An accepted swap costs one move; the session ends when moves reach zero
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{GameConfig, GameSession};
//! use tui_match3_types::Position;
//!
//! let mut session = GameSession::new(GameConfig::default().with_seed(12345));
//!
//! let a = Position::new(0, 0).unwrap();
//! let b = Position::new(0, 1).unwrap();
//! let outcome = session.attempt_swap(a, b);
//!
//! // Replay the turn's board transitions, then the session accepts input again.
//! let steps = session.drain_steps();
//! assert!(!session.is_busy());
//! if outcome.accepted() {
//!     assert!(session.score() > 0);
//!     assert!(!steps.is_empty());
//! }
//! ```

pub mod board;
pub mod cascade;
pub mod config;
pub mod controller;
pub mod matcher;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ColumnRefill};
pub use cascade::{resolve, resolve_capped, CascadeReport, StepSink};
pub use config::GameConfig;
pub use controller::{Click, MoveController, TurnResult};
pub use matcher::{find_matches, has_match, removal_set, Match, MatchList};
pub use rng::SimpleRng;
pub use session::{ClickOutcome, GameSession, GameState};
pub use snapshot::GameSnapshot;
pub use types::StepEvent;
