//! Game session - score/moves bookkeeping around the move controller
//!
//! The session owns the board, the RNG and the controller. Every turn's step
//! events are queued; the presentation layer pulls them with
//! [`GameSession::next_step`] (paced) or [`GameSession::drain_steps`] (all at
//! once). Input is rejected while the queue still holds steps of the last
//! turn.

use std::collections::VecDeque;

use tracing::{debug, info, instrument};

use crate::board::Board;
use crate::config::GameConfig;
use crate::controller::{Click, MoveController, TurnResult};
use crate::rng::SimpleRng;
use crate::snapshot::{fnv1a64_board, GameSnapshot};
use crate::types::{
    GameStatus, IgnoreReason, Position, StepEvent, SwapOutcome, SwapStatus,
};

/// Score and move budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    pub moves: u32,
    pub target_score: u32,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            moves: config.moves,
            target_score: config.target_score,
        }
    }

    pub fn status(&self) -> GameStatus {
        GameStatus::evaluate(self.moves, self.score, self.target_score)
    }
}

/// What a click did from the session's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored(IgnoreReason),
    Armed(Position),
    Cleared,
    /// The click completed a pair and the swap protocol ran.
    Swapped(SwapOutcome),
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    rng: SimpleRng,
    controller: MoveController,
    state: GameState,
    pending: VecDeque<StepEvent>,
    seed: u32,
}

impl GameSession {
    /// Start a session with a freshly initialized, match-free board.
    pub fn new(config: GameConfig) -> Self {
        let mut rng = SimpleRng::new(config.seed);
        let board = Board::initialized(&mut rng);
        info!(seed = config.seed, moves = config.moves, "session started");

        Self {
            config,
            board,
            rng,
            controller: MoveController::new(),
            state: GameState::new(&config),
            pending: VecDeque::new(),
            seed: config.seed,
        }
    }

    /// Start over with a new seed, keeping the move budget and target.
    pub fn restart(&mut self, seed: u32) {
        *self = Self::new(self.config.with_seed(seed));
    }

    /// Attempt to swap two tiles.
    ///
    /// An accepted swap costs one move and adds its cascade score; a reverted
    /// or ignored one changes neither.
    #[instrument(level = "debug", skip(self))]
    pub fn attempt_swap(&mut self, a: Position, b: Position) -> SwapOutcome {
        let result = self.controller.attempt_swap(
            &mut self.board,
            &mut self.rng,
            a,
            b,
            &mut self.pending,
        );

        let outcome = match result {
            TurnResult::Ignored(reason) => SwapOutcome::ignored(reason, self.state.moves),
            TurnResult::Reverted => SwapOutcome {
                status: SwapStatus::Reverted,
                score_delta: 0,
                moves_remaining: self.state.moves,
                cascades: 0,
            },
            TurnResult::Accepted(report) => {
                self.state.moves = self.state.moves.saturating_sub(1);
                self.state.score = self.state.score.saturating_add(report.score_delta);
                SwapOutcome {
                    status: SwapStatus::Accepted,
                    score_delta: report.score_delta,
                    moves_remaining: self.state.moves,
                    cascades: report.steps,
                }
            }
        };

        debug!(
            status = ?outcome.status,
            score = self.state.score,
            moves = self.state.moves,
            "swap resolved"
        );
        if self.status().is_terminal() {
            info!(
                status = self.status().as_str(),
                score = self.state.score,
                "move budget spent"
            );
        }
        self.release_if_drained();
        outcome
    }

    /// Feed a click into the selection state machine.
    pub fn click(&mut self, pos: Position) -> ClickOutcome {
        match self.controller.click(&self.board, pos) {
            Click::Ignored(reason) => ClickOutcome::Ignored(reason),
            Click::Armed(p) => ClickOutcome::Armed(p),
            Click::Cleared => ClickOutcome::Cleared,
            Click::SwapRequested(a, b) => ClickOutcome::Swapped(self.attempt_swap(a, b)),
        }
    }

    /// Pop the next queued step event.
    pub fn next_step(&mut self) -> Option<StepEvent> {
        let step = self.pending.pop_front();
        self.release_if_drained();
        step
    }

    /// Take every queued step event.
    pub fn drain_steps(&mut self) -> Vec<StepEvent> {
        let steps = self.pending.drain(..).collect();
        self.release_if_drained();
        steps
    }

    pub fn pending_steps(&self) -> usize {
        self.pending.len()
    }

    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    /// Replace the board with a fresh match-free layout.
    ///
    /// Score and moves are kept and no move is spent. Refused while busy.
    pub fn shuffle(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.board.initialize(&mut self.rng);
        self.controller.reset();
        info!("board shuffled");
        true
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn moves(&self) -> u32 {
        self.state.moves
    }

    pub fn target_score(&self) -> u32 {
        self.state.target_score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> Option<Position> {
        self.controller.selection()
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Install a scripted board; queued steps and selection are dropped.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
        self.pending.clear();
        self.controller.reset();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill an existing snapshot in place (no allocation).
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.board_hash = fnv1a64_board(&out.board);
        out.score = self.state.score;
        out.moves = self.state.moves;
        out.target_score = self.state.target_score;
        out.status = self.status();
        out.selection = self.selection();
        out.busy = self.is_busy();
        out.pending_steps = self.pending.len() as u32;
        out.seed = self.seed;
    }

    fn release_if_drained(&mut self) {
        if self.pending.is_empty() {
            self.controller.release();
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
