//! Command-line interface.

use clap::{Parser, Subcommand};

/// Terminal match-3 tile puzzle
#[derive(Parser, Debug)]
#[command(name = "tui-match3")]
#[command(about = "Swap adjacent tiles to line up three or more", long_about = None)]
#[command(version)]
pub struct Cli {
    /// RNG seed (overrides MATCH3_SEED)
    #[arg(long, global = true)]
    pub seed: Option<u32>,

    /// Move budget (overrides MATCH3_MOVES)
    #[arg(long, global = true)]
    pub moves: Option<u32>,

    /// Target score (overrides MATCH3_TARGET)
    #[arg(long, global = true)]
    pub target: Option<u32>,

    /// Mode to run; defaults to interactive play
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal
    Play,

    /// Line-delimited JSON requests on stdin, responses on stdout
    Pipe,
}
