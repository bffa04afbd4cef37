//! Protocol module - JSON message types for the pipe adapter
//!
//! One JSON object per line in each direction. Every message carries a
//! `type` tag; requests may carry a `seq` which is echoed on every response
//! line they produce.

use serde::{Deserialize, Serialize};

use crate::core::GameSnapshot;
use crate::engine::HintError;
use crate::types::{
    EngineError, GameStatus, IgnoreReason, Position, StepEvent, SwapOutcome,
};

// ============== Client -> Game Messages ==============

/// Coordinates as sent by clients; validated into [`Position`] by the adapter.
pub type RawCoord = [i64; 2];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Swap {
        #[serde(default)]
        seq: u64,
        a: RawCoord,
        b: RawCoord,
    },
    Click {
        #[serde(default)]
        seq: u64,
        row: i64,
        col: i64,
    },
    Snapshot {
        #[serde(default)]
        seq: u64,
    },
    Hint {
        #[serde(default)]
        seq: u64,
    },
    /// Play the hinted swap.
    PlayHint {
        #[serde(default)]
        seq: u64,
    },
    Shuffle {
        #[serde(default)]
        seq: u64,
    },
    Restart {
        #[serde(default)]
        seq: u64,
        #[serde(default)]
        seed: Option<u32>,
    },
}

impl Request {
    pub fn seq(&self) -> u64 {
        match self {
            Request::Swap { seq, .. }
            | Request::Click { seq, .. }
            | Request::Snapshot { seq }
            | Request::Hint { seq }
            | Request::PlayHint { seq }
            | Request::Shuffle { seq }
            | Request::Restart { seq, .. } => *seq,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Request::Swap { .. } => "swap",
            Request::Click { .. } => "click",
            Request::Snapshot { .. } => "snapshot",
            Request::Hint { .. } => "hint",
            Request::PlayHint { .. } => "play_hint",
            Request::Shuffle { .. } => "shuffle",
            Request::Restart { .. } => "restart",
        }
    }
}

// ============== Game -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidPosition,
    BadRequest,
    Busy,
    NoValidSwap,
}

impl From<&EngineError> for ErrorCode {
    fn from(err: &EngineError) -> Self {
        match err {
            EngineError::InvalidPosition { .. } => ErrorCode::InvalidPosition,
        }
    }
}

impl From<HintError> for ErrorCode {
    fn from(err: HintError) -> Self {
        match err {
            HintError::Busy => ErrorCode::Busy,
            HintError::NoValidSwap => ErrorCode::NoValidSwap,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickResult {
    Armed,
    Cleared,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HintBody {
    pub a: Position,
    pub b: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// One board transition; a swap's steps precede its `outcome`.
    Step { seq: u64, step: StepEvent },
    /// Result of a swap attempt.
    Outcome {
        seq: u64,
        outcome: SwapOutcome,
        score: u32,
        moves: u32,
        status: GameStatus,
    },
    /// A click that did not complete a swap.
    Click {
        seq: u64,
        result: ClickResult,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        reason: Option<IgnoreReason>,
        selection: Option<Position>,
    },
    Snapshot {
        seq: u64,
        snapshot: GameSnapshot,
        stuck: bool,
    },
    Hint { seq: u64, hint: Option<HintBody> },
    Error {
        seq: u64,
        code: ErrorCode,
        message: String,
    },
}

impl Response {
    pub fn seq(&self) -> u64 {
        match self {
            Response::Step { seq, .. }
            | Response::Outcome { seq, .. }
            | Response::Click { seq, .. }
            | Response::Snapshot { seq, .. }
            | Response::Hint { seq, .. }
            | Response::Error { seq, .. } => *seq,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }
}

// ============== Message Parsing ==============

/// Parse one request line.
///
/// Failures come back as a ready-to-send `bad_request` error carrying the
/// request's `seq` when one can be recovered.
pub fn parse_request(line: &str) -> Result<Request, Response> {
    serde_json::from_str::<Request>(line).map_err(|e| {
        #[derive(Deserialize)]
        struct SeqOnly {
            seq: Option<u64>,
        }
        let seq = serde_json::from_str::<SeqOnly>(line)
            .ok()
            .and_then(|s| s.seq)
            .unwrap_or(0);
        create_error(seq, ErrorCode::BadRequest, &e.to_string())
    })
}

// ============== Utility Functions ==============

pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> Response {
    Response::Error {
        seq,
        code,
        message: message.to_string(),
    }
}

pub fn create_outcome(seq: u64, outcome: SwapOutcome, snap: &GameSnapshot) -> Response {
    Response::Outcome {
        seq,
        outcome,
        score: snap.score,
        moves: snap.moves,
        status: snap.status,
    }
}
