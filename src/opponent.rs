//! Heuristic computer opponent.
//!
//! Looks exactly one ply ahead: take a winning square if there is one,
//! otherwise block the human's winning square, otherwise play a random
//! empty square. It can be drawn against and, in some lines, beaten.

use crate::games::tictactoe::{Board, Player, Position, rules};
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// Misuse of the opponent strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum OpponentError {
    /// Asked to move on a board with no empty squares.
    #[display("No empty squares to choose from")]
    NoEmptyCells,
}

/// Which rule picked the square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Reason {
    /// Completes one of the opponent's own lines.
    Win,
    /// Stops the human completing a line next turn.
    Block,
    /// Uniform pick among empty squares.
    Random,
}

/// First empty square (in index order) that completes a line for `player`.
#[instrument(skip(board))]
pub fn winning_square(board: &Board, player: Player) -> Option<Position> {
    board
        .empty_positions()
        .into_iter()
        .find(|pos| rules::has_line(&board.with_mark(*pos, player), player))
}

/// Win, block, or random opponent.
///
/// Does not check whose turn it is; the caller owns that.
#[derive(Debug, Clone)]
pub struct HeuristicOpponent<R = StdRng> {
    rng: R,
}

impl HeuristicOpponent<StdRng> {
    /// Creates an opponent seeded from the operating system.
    #[instrument]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for HeuristicOpponent<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: rand::Rng> HeuristicOpponent<R> {
    /// Creates an opponent drawing its random fallback from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Picks a square for `me` to play against `human`.
    ///
    /// # Errors
    ///
    /// Returns [`OpponentError::NoEmptyCells`] on a full board.
    #[instrument(skip(self, board))]
    pub fn choose_move(
        &mut self,
        board: &Board,
        me: Player,
        human: Player,
    ) -> Result<Position, OpponentError> {
        self.choose_move_with_reason(board, me, human)
            .map(|(pos, _)| pos)
    }

    /// Like [`choose_move`](Self::choose_move) but also reports which rule fired.
    #[instrument(skip(self, board))]
    pub fn choose_move_with_reason(
        &mut self,
        board: &Board,
        me: Player,
        human: Player,
    ) -> Result<(Position, Reason), OpponentError> {
        let empty = board.empty_positions();
        if empty.is_empty() {
            return Err(OpponentError::NoEmptyCells);
        }

        let (pos, reason) = if let Some(pos) = winning_square(board, me) {
            (pos, Reason::Win)
        } else if let Some(pos) = winning_square(board, human) {
            (pos, Reason::Block)
        } else {
            let pos = *empty.choose(&mut self.rng).ok_or(OpponentError::NoEmptyCells)?;
            (pos, Reason::Random)
        };

        debug!(position = ?pos, %reason, "Opponent chose square");
        Ok((pos, reason))
    }
}
