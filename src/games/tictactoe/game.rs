//! Board engine: the single entry point for moves.

use super::rules;
use super::types::{Board, GameStatus, Player, Square};
use super::position::Position;
use derive_more::{Display, Error};
use tracing::{debug, instrument, warn};

/// Why a move was refused. A refused move never touches the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveRejection {
    /// The game already reached a win or draw.
    #[display("Game is already over")]
    GameOver,
    /// Index outside 0-8.
    #[display("Position {index} is out of bounds (must be 0-8)")]
    OutOfBounds {
        /// The offending index.
        index: usize,
    },
    /// Square already holds a mark.
    #[display("Square {position} is already occupied")]
    Occupied {
        /// The occupied position.
        position: Position,
    },
    /// The acting player is not the one to move.
    #[display("It is {expected}'s turn, not {actual}'s")]
    OutOfTurn {
        /// Player whose turn it is.
        expected: Player,
        /// Player that attempted the move.
        actual: Player,
    },
}

/// Outcome of [`Game::submit_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// The mark was placed.
    Accepted {
        /// Status after the move.
        status: GameStatus,
        /// Whether the turn passed to the other player.
        turn_advanced: bool,
    },
    /// The move was refused and nothing changed.
    Rejected(MoveRejection),
}

impl MoveResult {
    /// True if the move was placed.
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveResult::Accepted { .. })
    }

    /// Status after an accepted move.
    pub fn status(&self) -> Option<GameStatus> {
        match self {
            MoveResult::Accepted { status, .. } => Some(*status),
            MoveResult::Rejected(_) => None,
        }
    }
}

/// Tic-tac-toe game engine.
///
/// Owns the board and the turn indicator. X always moves first and turns
/// alternate strictly, so X holds either as many squares as O or one more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    to_move: Player,
}

impl Game {
    /// Creates a new game with X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::X,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player to move. Frozen once the game is over.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Current status, derived from the board.
    pub fn status(&self) -> GameStatus {
        rules::evaluate(&self.board)
    }

    /// True once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        self.status().is_terminal()
    }

    /// Places `player`'s mark at `index`.
    ///
    /// Rejects the move if the game is over, the index is out of range, the
    /// square is taken, or `player` is not the one to move. Out-of-turn
    /// rejection is what keeps a stale scheduled move from landing.
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn submit_move(&mut self, index: usize, player: Player) -> MoveResult {
        match self.validate(index, player) {
            Ok(position) => {
                self.board.set(position, Square::Occupied(player));
                let status = self.status();
                let turn_advanced = !status.is_terminal();
                if turn_advanced {
                    self.to_move = player.opponent();
                }
                debug!(?position, ?status, turn_advanced, "Move accepted");
                MoveResult::Accepted {
                    status,
                    turn_advanced,
                }
            }
            Err(rejection) => {
                warn!(%rejection, "Move rejected");
                MoveResult::Rejected(rejection)
            }
        }
    }

    fn validate(&self, index: usize, player: Player) -> Result<Position, MoveRejection> {
        if self.is_over() {
            return Err(MoveRejection::GameOver);
        }
        let position = Position::from_index(index).ok_or(MoveRejection::OutOfBounds { index })?;
        if !self.board.is_empty(position) {
            return Err(MoveRejection::Occupied { position });
        }
        if player != self.to_move {
            return Err(MoveRejection::OutOfTurn {
                expected: self.to_move,
                actual: player,
            });
        }
        Ok(position)
    }

    /// Clears the board and gives the move back to X.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!("Resetting board");
        self.board = Board::new();
        self.to_move = Player::X;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
