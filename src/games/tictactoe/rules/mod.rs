//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Status is always derived from
//! the squares through [`evaluate`], never tracked on the side.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, Line, check_winner, has_line, winning_line};

use super::{Board, GameStatus};
use tracing::instrument;

/// Derives the status of `board`: a win takes precedence over a full board.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> GameStatus {
    if let Some((winner, line)) = winning_line(board) {
        GameStatus::Won { winner, line }
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}
