//! Tests for terminal app key handling.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tictactoe_duel::{
    App, GameSession, HeuristicOpponent, MemoryStore, OpponentDue, OpponentScheduler, Player,
    Position, ScoreRepository, Square, Theme,
};
use tokio::sync::mpsc::UnboundedReceiver;

fn app() -> (App<MemoryStore>, UnboundedReceiver<OpponentDue>) {
    let (scheduler, rx) = OpponentScheduler::new(Duration::from_millis(250));
    let session = GameSession::new(
        ScoreRepository::new(MemoryStore::new()),
        HeuristicOpponent::new(),
        scheduler,
    );
    (App::new(session), rx)
}

fn press(app: &mut App<MemoryStore>, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

#[tokio::test(start_paused = true)]
async fn test_digit_keys_place_marks() {
    let (mut app, _rx) = app();
    press(&mut app, KeyCode::Char('5'));
    assert_eq!(
        app.session().board().get(Position::Center),
        Square::Occupied(Player::X)
    );
    assert_eq!(app.cursor(), Position::Center);
    assert_eq!(app.status_line(), "O's turn");
}

#[tokio::test(start_paused = true)]
async fn test_arrows_then_enter_plays_cursor_square() {
    let (mut app, _rx) = app();
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Left);
    press(&mut app, KeyCode::Enter);
    assert_eq!(
        app.session().board().get(Position::TopLeft),
        Square::Occupied(Player::X)
    );
}

#[tokio::test(start_paused = true)]
async fn test_rejected_move_shows_reason() {
    let (mut app, _rx) = app();
    press(&mut app, KeyCode::Char('1'));
    press(&mut app, KeyCode::Char('1'));
    assert!(app.status_line().contains("occupied"));
}

#[tokio::test(start_paused = true)]
async fn test_enabling_opponent_opens_symbol_prompt() {
    let (mut app, mut rx) = app();
    press(&mut app, KeyCode::Char('a'));
    assert!(app.choosing_symbol());

    // Board keys are ignored while the prompt is open.
    press(&mut app, KeyCode::Char('5'));
    assert_eq!(app.session().board().count(Player::X), 0);

    press(&mut app, KeyCode::Char('o'));
    assert!(!app.choosing_symbol());
    assert_eq!(*app.session().mode().human(), Player::O);
    assert_eq!(app.status_line(), "Opponent is thinking...");

    let due = rx.recv().await.unwrap();
    app.on_opponent_due(due);
    assert_eq!(app.session().board().count(Player::X), 1);
}

#[tokio::test(start_paused = true)]
async fn test_win_shows_play_again() {
    let (mut app, _rx) = app();
    for key in ['1', '4', '2', '5', '3'] {
        press(&mut app, KeyCode::Char(key));
    }
    assert_eq!(app.status_line(), "X wins! Press n to play again.");
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.status_line(), "X's turn");
}

#[tokio::test(start_paused = true)]
async fn test_theme_toggle_and_quit() {
    let (mut app, _rx) = app();
    assert_eq!(app.theme(), Theme::Light);
    press(&mut app, KeyCode::Char('t'));
    assert_eq!(app.theme(), Theme::Dark);
    assert!(!app.should_quit());
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit());
}
