//! Command-line interface for tictactoe_duel.

use clap::{Parser, Subcommand};

use crate::games::tictactoe::Player;

/// Tic-tac-toe against a friend or a heuristic opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe_duel")]
#[command(about = "Terminal tic-tac-toe with a persisted scoreboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional; defaults apply if missing)
    #[arg(short, long, global = true, default_value = "tictactoe_duel.toml")]
    pub config: std::path::PathBuf,

    /// Override the score database path
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Start with the computer opponent enabled
        #[arg(long)]
        opponent: bool,

        /// Your symbol against the opponent (x or o); implies --opponent
        #[arg(long)]
        symbol: Option<Player>,

        /// Opponent reply delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Print the saved opponent-mode score
    Score,

    /// Reset the saved opponent-mode score to zero
    ResetScore,
}
