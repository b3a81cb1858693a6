mod game;
mod position;
pub mod rules;
mod types;

pub use game::{Game, MoveRejection, MoveResult};
pub use position::Position;
pub use rules::{LINES, Line};
pub use types::{Board, GameStatus, Player, Square};
