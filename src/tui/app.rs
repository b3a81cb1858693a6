//! Application state and key handling.

use crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, instrument};

use super::input::{digit_index, move_cursor};
use super::theme::Theme;
use crate::games::tictactoe::{GameStatus, MoveResult, Player, Position};
use crate::scheduler::OpponentDue;
use crate::session::GameSession;
use crate::store::KeyValueStore;

/// Main application state: the session plus presentation-only bits.
#[derive(Debug)]
pub struct App<S> {
    session: GameSession<S>,
    cursor: Position,
    theme: Theme,
    choosing_symbol: bool,
    message: Option<String>,
    quit: bool,
}

impl<S: KeyValueStore> App<S> {
    /// Creates a new application around `session`.
    pub fn new(session: GameSession<S>) -> Self {
        Self {
            session,
            cursor: Position::Center,
            theme: Theme::default(),
            choosing_symbol: false,
            message: None,
            quit: false,
        }
    }

    /// The game session.
    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    /// Square under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Active colour theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// True while the symbol-choice prompt is open.
    pub fn choosing_symbol(&self) -> bool {
        self.choosing_symbol
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// One-line status: result, whose turn, or the last notice.
    pub fn status_line(&self) -> String {
        match self.session.status() {
            GameStatus::Won { winner, .. } => format!("{} wins! Press n to play again.", winner),
            GameStatus::Draw => "It's a draw! Press n to play again.".to_string(),
            GameStatus::InProgress => {
                if self.session.opponent_thinking() {
                    "Opponent is thinking...".to_string()
                } else if let Some(message) = &self.message {
                    message.clone()
                } else {
                    format!("{}'s turn", self.session.to_move())
                }
            }
        }
    }

    /// Applies a fired opponent timer.
    #[instrument(skip(self))]
    pub fn on_opponent_due(&mut self, due: OpponentDue) {
        if let Some(result) = self.session.on_opponent_due(due) {
            self.note_move(result, self.session.mode().opponent());
        }
    }

    /// Handles one key press.
    #[instrument(skip(self, key), fields(key = ?key.code))]
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.choosing_symbol {
            self.handle_symbol_prompt(key.code);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key.code);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.play(self.cursor.to_index()),
            code @ KeyCode::Char('1'..='9') => {
                if let Some(index) = digit_index(code) {
                    if let Some(pos) = Position::from_index(index) {
                        self.cursor = pos;
                    }
                    self.play(index);
                }
            }
            KeyCode::Char('n') => {
                self.session.new_game();
                self.message = None;
            }
            KeyCode::Char('a') => {
                let enable = !*self.session.mode().opponent_enabled();
                self.session.set_opponent_mode(enable);
                self.choosing_symbol = enable;
                self.message = Some(if enable {
                    "Opponent mode on".to_string()
                } else {
                    "Two-player mode".to_string()
                });
            }
            KeyCode::Char('c') if *self.session.mode().opponent_enabled() => {
                self.choosing_symbol = true;
            }
            KeyCode::Char('r') if *self.session.mode().opponent_enabled() => {
                self.session.reset_score();
                self.message = Some("Score reset".to_string());
            }
            KeyCode::Char('t') => self.theme = self.theme.toggle(),
            _ => {}
        }
    }

    fn handle_symbol_prompt(&mut self, code: KeyCode) {
        let human = match code {
            KeyCode::Char('x') | KeyCode::Char('X') => Player::X,
            KeyCode::Char('o') | KeyCode::Char('O') => Player::O,
            KeyCode::Esc => {
                self.choosing_symbol = false;
                return;
            }
            _ => return,
        };
        self.choosing_symbol = false;
        self.session.choose_human_symbol(human);
        self.message = Some(format!("You play {}", human));
    }

    fn play(&mut self, index: usize) {
        let mover = self.session.to_move();
        let result = self.session.human_move(index);
        self.note_move(result, mover);
    }

    fn note_move(&mut self, result: MoveResult, mover: Player) {
        self.message = match result {
            MoveResult::Accepted { .. } => {
                debug!(%mover, "Move applied to UI state");
                None
            }
            MoveResult::Rejected(rejection) => Some(rejection.to_string()),
        };
    }
}
