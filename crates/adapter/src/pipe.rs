//! Line runner: reads requests from a `BufRead`, answers on a `Write`.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::core::{ClickOutcome, GameSession};
use crate::engine::{apply_hint, hint, is_stuck};
use crate::protocol::{
    create_error, create_outcome, parse_request, ClickResult, ErrorCode, HintBody, RawCoord,
    Request, Response,
};
use crate::types::{EngineError, Position, SwapOutcome};

/// Totals for one pipe session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipeStats {
    pub requests: u64,
    pub errors: u64,
}

/// Drives a [`GameSession`] from protocol requests.
///
/// Every step a request produces is drained into the response, so the
/// session is idle again when `handle` returns.
pub struct PipeAdapter {
    session: GameSession,
}

impl PipeAdapter {
    pub fn new(session: GameSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Answer one raw line. Blank lines produce nothing.
    pub fn handle_line(&mut self, line: &str) -> Vec<Response> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        match parse_request(trimmed) {
            Ok(req) => self.handle(req),
            Err(err) => {
                warn!(line = trimmed, "unparsable request");
                vec![err]
            }
        }
    }

    pub fn handle(&mut self, req: Request) -> Vec<Response> {
        let seq = req.seq();
        debug!(seq, request = req.name(), "request");
        match req {
            Request::Swap { a, b, .. } => match (coord(a), coord(b)) {
                (Ok(a), Ok(b)) => {
                    let outcome = self.session.attempt_swap(a, b);
                    self.with_steps(seq, outcome)
                }
                (Err(e), _) | (_, Err(e)) => vec![engine_error(seq, &e)],
            },
            Request::Click { row, col, .. } => match Position::from_signed(row, col) {
                Ok(pos) => self.click(seq, pos),
                Err(e) => vec![engine_error(seq, &e)],
            },
            Request::Snapshot { .. } => vec![self.snapshot(seq)],
            Request::Hint { .. } => {
                let hint = hint(self.session.board()).map(|m| HintBody { a: m.a, b: m.b });
                vec![Response::Hint { seq, hint }]
            }
            Request::PlayHint { .. } => match apply_hint(&mut self.session) {
                Ok(outcome) => self.with_steps(seq, outcome),
                Err(e) => vec![create_error(seq, ErrorCode::from(e), e.message())],
            },
            Request::Shuffle { .. } => {
                if !self.session.shuffle() {
                    return vec![create_error(seq, ErrorCode::Busy, "steps still pending")];
                }
                vec![self.snapshot(seq)]
            }
            Request::Restart { seed, .. } => {
                let seed = seed.unwrap_or_else(|| self.session.seed().wrapping_add(1));
                self.session.restart(seed);
                vec![self.snapshot(seq)]
            }
        }
    }

    fn click(&mut self, seq: u64, pos: Position) -> Vec<Response> {
        let (result, reason) = match self.session.click(pos) {
            ClickOutcome::Swapped(outcome) => return self.with_steps(seq, outcome),
            ClickOutcome::Armed(_) => (ClickResult::Armed, None),
            ClickOutcome::Cleared => (ClickResult::Cleared, None),
            ClickOutcome::Ignored(reason) => (ClickResult::Ignored, Some(reason)),
        };
        vec![Response::Click {
            seq,
            result,
            reason,
            selection: self.session.selection(),
        }]
    }

    /// Drained steps in order, then the outcome line.
    fn with_steps(&mut self, seq: u64, outcome: SwapOutcome) -> Vec<Response> {
        let mut out: Vec<Response> = self
            .session
            .drain_steps()
            .into_iter()
            .map(|step| Response::Step { seq, step })
            .collect();
        out.push(create_outcome(seq, outcome, &self.session.snapshot()));
        out
    }

    fn snapshot(&self, seq: u64) -> Response {
        Response::Snapshot {
            seq,
            snapshot: self.session.snapshot(),
            stuck: is_stuck(self.session.board()),
        }
    }
}

/// Serve requests until EOF, writing one JSON line per response.
pub fn run_pipe<R: BufRead, W: Write>(
    adapter: &mut PipeAdapter,
    reader: R,
    mut writer: W,
) -> Result<PipeStats> {
    let mut stats = PipeStats::default();
    info!(seed = adapter.session().seed(), "pipe adapter started");

    for line in reader.lines() {
        let line = line.context("read request line")?;
        let responses = adapter.handle_line(&line);
        if responses.is_empty() {
            continue;
        }
        stats.requests += 1;
        for resp in &responses {
            if resp.is_error() {
                stats.errors += 1;
            }
            serde_json::to_writer(&mut writer, resp).context("encode response")?;
            writer.write_all(b"\n").context("write response")?;
        }
        writer.flush().context("flush responses")?;
    }

    info!(
        requests = stats.requests,
        errors = stats.errors,
        "pipe adapter finished"
    );
    Ok(stats)
}

fn coord(raw: RawCoord) -> Result<Position, EngineError> {
    Position::from_signed(raw[0], raw[1])
}

fn engine_error(seq: u64, err: &EngineError) -> Response {
    create_error(seq, ErrorCode::from(err), &err.to_string())
}
