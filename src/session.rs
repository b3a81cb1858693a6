//! Game session: the command surface the UI drives.
//!
//! Owns one [`Game`], the mode and symbol settings, the scoreboard, and the
//! scheduler for deferred opponent moves. Everything runs on the caller's
//! task; the only deferred work is the opponent's delayed reply, which comes
//! back through [`GameSession::on_opponent_due`].

use derive_getters::Getters;
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

use crate::games::tictactoe::{Board, Game, GameStatus, MoveResult, Player};
use crate::opponent::HeuristicOpponent;
use crate::scheduler::{OpponentDue, OpponentScheduler};
use crate::score::{GameOutcome, Score, ScoreRepository};
use crate::store::KeyValueStore;

/// Opponent mode and the symbols in play.
///
/// The opponent always plays the symbol the human did not pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct ModeConfig {
    /// Whether the computer plays one side.
    opponent_enabled: bool,
    /// The human's symbol in opponent mode.
    human: Player,
}

impl ModeConfig {
    /// Two humans, X first.
    pub fn two_player() -> Self {
        Self {
            opponent_enabled: false,
            human: Player::X,
        }
    }

    /// Computer opponent, human playing `human`.
    pub fn against_opponent(human: Player) -> Self {
        Self {
            opponent_enabled: true,
            human,
        }
    }

    /// The computer's symbol.
    pub fn opponent(&self) -> Player {
        self.human.opponent()
    }
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self::two_player()
    }
}

/// One interactive game plus its scoreboard.
#[derive(Debug)]
pub struct GameSession<S, R = StdRng> {
    game: Game,
    mode: ModeConfig,
    score: Score,
    scores: ScoreRepository<S>,
    opponent: HeuristicOpponent<R>,
    scheduler: OpponentScheduler,
}

impl<S: KeyValueStore, R: Rng> GameSession<S, R> {
    /// Creates a two-player session, loading the saved score.
    #[instrument(skip_all)]
    pub fn new(
        scores: ScoreRepository<S>,
        opponent: HeuristicOpponent<R>,
        scheduler: OpponentScheduler,
    ) -> Self {
        let score = scores.load();
        info!(?score, "Creating game session");
        Self {
            game: Game::new(),
            mode: ModeConfig::two_player(),
            score,
            scores,
            opponent,
            scheduler,
        }
    }

    /// The board.
    pub fn board(&self) -> &Board {
        self.game.board()
    }

    /// Player to move.
    pub fn to_move(&self) -> Player {
        self.game.to_move()
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.game.status()
    }

    /// The underlying engine.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Current mode settings.
    pub fn mode(&self) -> ModeConfig {
        self.mode
    }

    /// Current scoreboard.
    pub fn score(&self) -> Score {
        self.score
    }

    /// True while the opponent's delayed reply is pending.
    pub fn opponent_thinking(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// True when a click on the board would be accepted as the human's move.
    pub fn awaiting_human(&self) -> bool {
        !self.game.is_over()
            && (!self.mode.opponent_enabled || self.game.to_move() == self.mode.human)
    }

    /// Submits a human move at `index`.
    ///
    /// In opponent mode the human may only play their own symbol; in
    /// two-player mode whoever is to move plays.
    #[instrument(skip(self))]
    pub fn human_move(&mut self, index: usize) -> MoveResult {
        let acting = if self.mode.opponent_enabled {
            self.mode.human
        } else {
            self.game.to_move()
        };
        let result = self.game.submit_move(index, acting);
        self.after_move(result);
        result
    }

    /// Handles a fired opponent timer. Returns the opponent's move result,
    /// or `None` if the timer was stale or the position no longer calls for
    /// an opponent move.
    #[instrument(skip(self))]
    pub fn on_opponent_due(&mut self, due: OpponentDue) -> Option<MoveResult> {
        if !self.scheduler.claim(due) {
            return None;
        }
        self.play_opponent_move()
    }

    fn play_opponent_move(&mut self) -> Option<MoveResult> {
        let me = self.mode.opponent();
        if !self.mode.opponent_enabled || self.game.is_over() || self.game.to_move() != me {
            debug!("Opponent move no longer applicable");
            return None;
        }

        let position = match self.opponent.choose_move(self.game.board(), me, self.mode.human) {
            Ok(position) => position,
            Err(e) => {
                warn!(error = %e, "Opponent could not move");
                return None;
            }
        };

        let result = self.game.submit_move(position.to_index(), me);
        self.after_move(result);
        Some(result)
    }

    fn after_move(&mut self, result: MoveResult) {
        let MoveResult::Accepted { status, .. } = result else {
            return;
        };

        if status.is_terminal() {
            self.scheduler.cancel();
            self.record(status);
        } else if self.mode.opponent_enabled && self.game.to_move() == self.mode.opponent() {
            self.scheduler.schedule();
        }
    }

    fn record(&mut self, status: GameStatus) {
        if !self.mode.opponent_enabled {
            return;
        }
        let Some(outcome) = GameOutcome::from_status(status, self.mode.human) else {
            return;
        };
        self.score.record(outcome);
        info!(?outcome, score = ?self.score, "Game over");
        self.persist_score();
    }

    fn persist_score(&mut self) {
        if let Err(e) = self.scores.save(&self.score) {
            warn!(error = %e, "Failed to save score");
        }
    }

    /// Starts a fresh game, keeping mode and score.
    ///
    /// If the opponent plays X, its first move is scheduled.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.scheduler.cancel();
        self.game.reset();
        info!(mode = ?self.mode, "New game");
        if self.mode.opponent_enabled && self.mode.opponent() == Player::X {
            self.scheduler.schedule();
        }
    }

    /// Turns opponent mode on or off.
    ///
    /// Turning it on starts a new game with the default symbols (human X).
    /// Turning it off cancels any pending reply and restores the default
    /// symbols; the board is left as is and both sides become human.
    #[instrument(skip(self))]
    pub fn set_opponent_mode(&mut self, enabled: bool) {
        if enabled {
            self.mode = ModeConfig::against_opponent(Player::X);
            self.new_game();
        } else {
            self.scheduler.cancel();
            self.mode = ModeConfig::two_player();
            info!("Opponent mode off");
        }
    }

    /// Picks the human's symbol and restarts.
    ///
    /// Only meaningful in opponent mode; returns `false` and changes nothing
    /// otherwise. Choosing O hands the first move to the opponent.
    #[instrument(skip(self))]
    pub fn choose_human_symbol(&mut self, human: Player) -> bool {
        if !self.mode.opponent_enabled {
            warn!("Symbol choice ignored outside opponent mode");
            return false;
        }
        self.mode = ModeConfig::against_opponent(human);
        self.new_game();
        true
    }

    /// Zeroes and saves the scoreboard.
    #[instrument(skip(self))]
    pub fn reset_score(&mut self) {
        self.score = Score::default();
        info!("Score reset");
        self.persist_score();
    }
}
