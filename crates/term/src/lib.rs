//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It renders into
//! a plain framebuffer that is flushed to the terminal with diffing, rather
//! than going through a widget toolkit.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: pure snapshot -> framebuffer mapping (2x1 chars per slot)
//! - [`playback`]: the board as currently shown while step events replay
//! - [`pacer`]: spaces step events out in time
//! - [`renderer`]: crossterm output with changed-run diffing

pub mod fb;
pub mod game_view;
pub mod pacer;
pub mod playback;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, ViewState, Viewport};
pub use pacer::StepPacer;
pub use playback::StepPlayback;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
