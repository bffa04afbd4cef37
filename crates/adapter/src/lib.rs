//! Adapter module - scripted control over a line-delimited JSON pipe
//!
//! Lets external programs (bots, test harnesses, other front ends) play a
//! session through any `BufRead`/`Write` pair; the binary's `pipe` mode binds
//! it to stdin/stdout.
//!
//! # Message Types
//!
//! ## Client → Game
//!
//! - **swap**: `{"type":"swap","seq":1,"a":[3,1],"b":[4,1]}`
//! - **click**: `{"type":"click","seq":2,"row":3,"col":1}`
//! - **snapshot** / **hint** / **play_hint** / **shuffle**
//! - **restart**: `{"type":"restart","seed":42}` (seed optional)
//!
//! ## Game → Client
//!
//! - **step**: one per board transition, in order
//! - **outcome**: closes a swap (after its steps), with score/moves/status
//! - **click**: selection change for a click that did not swap
//! - **snapshot**: full state plus whether the board is stuck
//! - **hint**: the first valid swap, or `null`
//! - **error**: `invalid_position`, `bad_request`, `busy`, `no_valid_swap`
//!
//! Every non-blank line is answered. Responses echo the request's `seq`
//! (0 when absent).
//!
//! # Example Flow
//!
//! ```text
//! -> {"type":"swap","seq":1,"a":[3,1],"b":[4,1]}
//! <- {"type":"step","seq":1,"step":{"event":"swapped",...}}
//! <- {"type":"step","seq":1,"step":{"event":"removed","step":1,...}}
//! <- ...
//! <- {"type":"outcome","seq":1,"outcome":{"status":"accepted",...},"score":30,"moves":29,"status":"playing"}
//! ```

pub mod pipe;
pub mod protocol;

pub use tui_match3_core as core;
pub use tui_match3_engine as engine;
pub use tui_match3_types as types;

pub use pipe::{run_pipe, PipeAdapter, PipeStats};
pub use protocol::*;
