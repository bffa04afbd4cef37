//! Terminal match-3 runner (default binary).
//!
//! `tui-match3` plays in the terminal with crossterm input and the
//! framebuffer renderer; `tui-match3 pipe` serves the JSON line protocol on
//! stdin/stdout.

mod cli;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use tui_match3::adapter::{run_pipe, PipeAdapter};
use tui_match3::core::config::clock_seed;
use tui_match3::core::{GameConfig, GameSession};
use tui_match3::engine::{hint, is_stuck};
use tui_match3::input::{handle_key_event, should_quit, Cursor};
use tui_match3::term::{
    FrameBuffer, GameView, StepPacer, StepPlayback, TerminalRenderer, ViewState, Viewport,
};
use tui_match3::types::{Position, UiAction};

/// Input poll interval while no steps are queued.
const IDLE_POLL_MS: u64 = 250;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = GameConfig::from_env();
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(moves) = cli.moves {
        config.moves = moves;
    }
    if let Some(target) = cli.target {
        config.target_score = target;
    }

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => {
            init_file_logging()?;
            play(config)
        }
        Command::Pipe => {
            init_stderr_logging();
            let mut adapter = PipeAdapter::new(GameSession::new(config));
            let stdin = io::stdin();
            run_pipe(&mut adapter, stdin.lock(), io::stdout().lock())?;
            Ok(())
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// The terminal owns stdout, so play-mode logs only go to `MATCH3_LOG_PATH`.
fn init_file_logging() -> Result<()> {
    let Ok(path) = std::env::var("MATCH3_LOG_PATH") else {
        return Ok(());
    };
    let file = std::fs::File::create(&path).with_context(|| format!("create log file {path}"))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .try_init();
}

fn play(config: GameConfig) -> Result<()> {
    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| run(&mut term, config));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<()> {
    let mut session = GameSession::new(config);
    let view = GameView::default();
    let mut cursor = Cursor::default();
    let mut playback = StepPlayback::new(&session.snapshot());
    let mut pacer = StepPacer::new(config.pace_ms as u64);
    let mut hinted: Option<(Position, Position)> = None;
    let mut stuck_cache: Option<(u64, bool)> = None;
    let mut fb = FrameBuffer::new(0, 0);
    let clock = Instant::now();

    loop {
        let now_ms = clock.elapsed().as_millis() as u64;

        // Release queued steps at the configured pace.
        if session.pending_steps() > 0 {
            if pacer.ready(now_ms) {
                if let Some(step) = session.next_step() {
                    playback.apply(&step);
                }
            }
        } else {
            pacer.idle();
        }

        // Render.
        let mut snap = session.snapshot();
        let stuck = match stuck_cache {
            Some((hash, stuck)) if hash == snap.board_hash => stuck,
            _ => {
                let stuck = is_stuck(session.board());
                stuck_cache = Some((snap.board_hash, stuck));
                stuck
            }
        };
        playback.overlay(&mut snap);
        let state = ViewState {
            cursor: Some(cursor.position()),
            hint: hinted,
            flash: playback.flash(),
            stuck: stuck && !snap.busy,
        };
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, &state, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next step is due.
        let timeout = if session.pending_steps() > 0 {
            pacer.remaining_ms(now_ms)
        } else {
            IDLE_POLL_MS
        };
        if !event::poll(Duration::from_millis(timeout))? {
            continue;
        }

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            Event::Resize(..) => {
                term.invalidate();
                continue;
            }
            _ => continue,
        };
        if should_quit(key) {
            info!(score = session.score(), moves = session.moves(), "quit");
            return Ok(());
        }
        let Some(action) = handle_key_event(key) else {
            continue;
        };
        debug!(action = action.as_str(), busy = session.is_busy(), "input");
        if cursor.apply(action) || session.is_busy() {
            continue;
        }

        match action {
            UiAction::Select if !snap.status.is_terminal() => {
                hinted = None;
                session.click(cursor.position());
            }
            UiAction::Hint if !snap.status.is_terminal() => {
                hinted = hint(session.board()).map(|m| (m.a, m.b));
            }
            UiAction::Shuffle if stuck => {
                session.shuffle();
                playback.sync(&session.snapshot());
                hinted = None;
            }
            UiAction::Restart => {
                session.restart(clock_seed());
                playback.sync(&session.snapshot());
                cursor = Cursor::default();
                hinted = None;
            }
            _ => {}
        }
    }
}
