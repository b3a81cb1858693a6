//! Tic-tac-toe duel library
//!
//! A tic-tac-toe engine with a one-ply heuristic computer opponent,
//! a persisted scoreboard, and a terminal front end.
//!
//! # Architecture
//!
//! - **Engine**: [`Game`] owns the board and turn, validates moves, and
//!   derives [`GameStatus`] from the board
//! - **Opponent**: [`HeuristicOpponent`] picks win, then block, then random
//! - **Scheduler**: [`OpponentScheduler`] delays opponent replies as
//!   cancellable tasks
//! - **Session**: [`GameSession`] ties engine, opponent, mode, and score
//!   together behind the commands the UI issues
//! - **Storage**: [`KeyValueStore`] with SQLite and in-memory backends
//!
//! # Example
//!
//! ```
//! use tictactoe_duel::{Game, GameStatus, MoveResult, Player};
//!
//! let mut game = Game::new();
//! let result = game.submit_move(4, Player::X);
//! assert!(result.is_accepted());
//! assert_eq!(game.to_move(), Player::O);
//! assert_eq!(game.status(), GameStatus::InProgress);
//!
//! // O may not play out of turn twice.
//! game.submit_move(0, Player::O);
//! assert!(matches!(game.submit_move(1, Player::O), MoveResult::Rejected(_)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod games;
mod opponent;
mod scheduler;
mod score;
mod session;
mod store;
mod tui;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, Game, GameStatus, LINES, Line, MoveRejection, MoveResult, Player, Position, Square,
    rules,
};

// Crate-level exports - Opponent
pub use opponent::{HeuristicOpponent, OpponentError, Reason, winning_square};

// Crate-level exports - Scheduling
pub use scheduler::{OpponentDue, OpponentScheduler, Ticket};

// Crate-level exports - Score
pub use score::{GameOutcome, SCORE_KEY, Score, ScoreRepository};

// Crate-level exports - Session
pub use session::{GameSession, ModeConfig};

// Crate-level exports - Storage
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError};

// Crate-level exports - Terminal UI
pub use tui::{App, Palette, Theme, run_tui};
