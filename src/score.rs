//! Opponent-mode scoreboard and its persistence.

use derive_getters::Getters;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::games::tictactoe::{GameStatus, Player};
use crate::store::{KeyValueStore, StoreError};

/// Storage key for the serialized score.
pub const SCORE_KEY: &str = "tictactoe_ai_score";

/// Game outcome from the human's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    /// Human won the game.
    HumanWin,
    /// Opponent won the game.
    OpponentWin,
    /// Game ended in a draw.
    Draw,
}

impl GameOutcome {
    /// Maps a terminal status to an outcome, `None` while still in progress.
    #[instrument]
    pub fn from_status(status: GameStatus, human: Player) -> Option<Self> {
        match status {
            GameStatus::InProgress => None,
            GameStatus::Draw => Some(Self::Draw),
            GameStatus::Won { winner, .. } if winner == human => Some(Self::HumanWin),
            GameStatus::Won { .. } => Some(Self::OpponentWin),
        }
    }
}

/// Win/loss/draw counters against the computer opponent.
///
/// Each counter loads on its own: a missing or non-numeric field reads as
/// zero without discarding the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Score {
    #[serde(rename = "user", deserialize_with = "lenient_count")]
    human_wins: u32,
    #[serde(rename = "ai", deserialize_with = "lenient_count")]
    opponent_wins: u32,
    #[serde(rename = "draw", deserialize_with = "lenient_count")]
    draws: u32,
}

/// Reads a counter from any JSON value. Non-negative integers clamp to
/// `u32::MAX`; everything else is zero.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(0))
}

impl Score {
    /// Creates a score with the given counters.
    pub fn new(human_wins: u32, opponent_wins: u32, draws: u32) -> Self {
        Self {
            human_wins,
            opponent_wins,
            draws,
        }
    }

    /// Bumps the counter for `outcome`.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: GameOutcome) {
        let counter = match outcome {
            GameOutcome::HumanWin => &mut self.human_wins,
            GameOutcome::OpponentWin => &mut self.opponent_wins,
            GameOutcome::Draw => &mut self.draws,
        };
        *counter = counter.saturating_add(1);
    }

    /// Total games counted, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.human_wins
            .saturating_add(self.opponent_wins)
            .saturating_add(self.draws)
    }
}

/// Loads and saves the [`Score`] through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct ScoreRepository<S> {
    store: S,
}

impl<S: KeyValueStore> ScoreRepository<S> {
    /// Wraps a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the saved score.
    ///
    /// Absent, unreadable, or malformed data yields the zero score; nothing
    /// here is fatal.
    #[instrument(skip(self))]
    pub fn load(&self) -> Score {
        let raw = match self.store.get(SCORE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved score, starting from zero");
                return Score::default();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read saved score, starting from zero");
                return Score::default();
            }
        };

        match serde_json::from_str::<Score>(&raw) {
            Ok(score) => {
                info!(?score, "Loaded saved score");
                score
            }
            Err(e) => {
                warn!(error = %e, raw = %raw, "Malformed saved score, starting from zero");
                Score::default()
            }
        }
    }

    /// Writes `score` to the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the write fails.
    #[instrument(skip(self))]
    pub fn save(&mut self, score: &Score) -> Result<(), StoreError> {
        let raw = serde_json::to_string(score)?;
        self.store.set(SCORE_KEY, &raw)?;
        debug!(raw = %raw, "Saved score");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn repo_with(raw: &str) -> ScoreRepository<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set(SCORE_KEY, raw).unwrap();
        ScoreRepository::new(store)
    }

    #[test]
    fn test_absent_score_defaults() {
        let repo = ScoreRepository::new(MemoryStore::new());
        assert_eq!(repo.load(), Score::default());
    }

    #[test]
    fn test_malformed_score_defaults() {
        assert_eq!(repo_with("{not json").load(), Score::default());
        assert_eq!(repo_with(r#""three""#).load(), Score::default());
        assert_eq!(repo_with(r#"{"user":-4}"#).load(), Score::default());
    }

    #[test]
    fn test_bad_field_zeroes_only_that_counter() {
        assert_eq!(
            repo_with(r#"{"user":5,"ai":null,"draw":2}"#).load(),
            Score::new(5, 0, 2)
        );
        assert_eq!(
            repo_with(r#"{"user":"7","ai":1.5,"draw":-3}"#).load(),
            Score::default()
        );
    }

    #[test]
    fn test_huge_counters_do_not_overflow() {
        let score = repo_with(r#"{"user":4294967295,"ai":1}"#).load();
        assert_eq!(score, Score::new(u32::MAX, 1, 0));
        assert_eq!(score.total(), u32::MAX);

        let clamped = repo_with(r#"{"user":99999999999}"#).load();
        assert_eq!(*clamped.human_wins(), u32::MAX);
    }

    #[test]
    fn test_partial_score_fills_zero() {
        assert_eq!(repo_with(r#"{"ai":3}"#).load(), Score::new(0, 3, 0));
    }

    #[test]
    fn test_save_then_load() {
        let mut repo = ScoreRepository::new(MemoryStore::new());
        let score = Score::new(2, 5, 1);
        repo.save(&score).unwrap();
        assert_eq!(repo.load(), score);
    }

    #[test]
    fn test_outcome_from_status() {
        let line = crate::games::tictactoe::LINES[0];
        let won_by_o = GameStatus::Won {
            winner: Player::O,
            line,
        };
        assert_eq!(
            GameOutcome::from_status(won_by_o, Player::O),
            Some(GameOutcome::HumanWin)
        );
        assert_eq!(
            GameOutcome::from_status(won_by_o, Player::X),
            Some(GameOutcome::OpponentWin)
        );
        assert_eq!(
            GameOutcome::from_status(GameStatus::Draw, Player::X),
            Some(GameOutcome::Draw)
        );
        assert_eq!(GameOutcome::from_status(GameStatus::InProgress, Player::X), None);
    }

    #[test]
    fn test_record_counts() {
        let mut score = Score::default();
        score.record(GameOutcome::HumanWin);
        score.record(GameOutcome::Draw);
        score.record(GameOutcome::Draw);
        assert_eq!(score, Score::new(1, 0, 2));
        assert_eq!(score.total(), 3);
    }
}
