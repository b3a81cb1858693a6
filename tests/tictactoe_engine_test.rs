//! Tests for the tic-tac-toe board engine.

use tictactoe_duel::{
    Board, Game, GameStatus, LINES, MoveRejection, MoveResult, Player, Position, Square,
};

/// Plays `indices` alternately starting with X, asserting each is accepted.
fn play(indices: &[usize]) -> Game {
    let mut game = Game::new();
    for &i in indices {
        let mover = game.to_move();
        assert!(
            game.submit_move(i, mover).is_accepted(),
            "move {} by {} should be accepted",
            i,
            mover
        );
    }
    game
}

#[test]
fn test_new_game_is_empty_with_x_to_move() {
    let game = Game::new();
    assert_eq!(game.board(), &Board::new());
    assert_eq!(game.to_move(), Player::X);
    assert_eq!(game.status(), GameStatus::InProgress);
}

#[test]
fn test_turn_alternates_from_x() {
    let mut game = Game::new();
    let order = [4, 0, 8, 2, 1, 7, 6, 5, 3];
    for (n, &i) in order.iter().enumerate() {
        let expected = if n % 2 == 0 { Player::X } else { Player::O };
        assert_eq!(game.to_move(), expected);
        let x = game.board().count(Player::X);
        let o = game.board().count(Player::O);
        assert!(x == o || x == o + 1);
        if game.is_over() {
            break;
        }
        game.submit_move(i, expected);
    }
}

#[test]
fn test_accepted_move_reports_turn_advance() {
    let mut game = Game::new();
    assert_eq!(
        game.submit_move(4, Player::X),
        MoveResult::Accepted {
            status: GameStatus::InProgress,
            turn_advanced: true,
        }
    );
    assert_eq!(game.board().get(Position::Center), Square::Occupied(Player::X));
}

#[test]
fn test_occupied_square_rejected_without_mutation() {
    let mut game = play(&[4]);
    let before = game.clone();
    assert_eq!(
        game.submit_move(4, Player::O),
        MoveResult::Rejected(MoveRejection::Occupied {
            position: Position::Center
        })
    );
    assert_eq!(game, before);
}

#[test]
fn test_out_of_turn_rejected_without_mutation() {
    let mut game = play(&[4]);
    let before = game.clone();
    assert_eq!(
        game.submit_move(0, Player::X),
        MoveResult::Rejected(MoveRejection::OutOfTurn {
            expected: Player::O,
            actual: Player::X,
        })
    );
    assert_eq!(game, before);
}

#[test]
fn test_out_of_bounds_rejected() {
    let mut game = Game::new();
    assert_eq!(
        game.submit_move(9, Player::X),
        MoveResult::Rejected(MoveRejection::OutOfBounds { index: 9 })
    );
    assert_eq!(game.board(), &Board::new());
}

#[test]
fn test_moves_after_win_rejected() {
    // X: 0,1,2 ; O: 3,4
    let mut game = play(&[0, 3, 1, 4, 2]);
    assert!(game.is_over());
    // Turn is frozen on the winner.
    assert_eq!(game.to_move(), Player::X);
    let before = game.clone();
    assert_eq!(
        game.submit_move(8, Player::O),
        MoveResult::Rejected(MoveRejection::GameOver)
    );
    assert_eq!(game, before);
}

#[test]
fn test_winning_move_does_not_advance_turn() {
    let mut game = play(&[0, 3, 1, 4]);
    let result = game.submit_move(2, Player::X);
    assert_eq!(
        result,
        MoveResult::Accepted {
            status: GameStatus::Won {
                winner: Player::X,
                line: LINES[0],
            },
            turn_advanced: false,
        }
    );
}

#[test]
fn test_each_line_wins_with_that_line() {
    for line in LINES {
        let [a, b, c] = line.indices();
        // Two O fillers that are not on this line and do not form a line
        // with each other's help.
        let fillers: Vec<usize> = (0..9).filter(|i| !line.indices().contains(i)).collect();
        let mut game = Game::new();
        let plan = [a, fillers[0], b, fillers[1], c];
        let mut last = None;
        for i in plan {
            let mover = game.to_move();
            last = Some(game.submit_move(i, mover));
        }
        match last.and_then(|r| r.status()) {
            Some(GameStatus::Won { winner, line: won }) => {
                assert_eq!(winner, Player::X);
                assert_eq!(won, line);
            }
            other => panic!("line {:?} should win, got {:?}", line, other),
        }
    }
}

#[test]
fn test_full_board_without_line_is_draw() {
    // X O X / X O O / O X X
    let mut game = play(&[0, 1, 2, 4, 3, 5, 7, 6]);
    let result = game.submit_move(8, Player::X);
    assert_eq!(
        result,
        MoveResult::Accepted {
            status: GameStatus::Draw,
            turn_advanced: false,
        }
    );
    assert!(game.is_over());
}

#[test]
fn test_partial_board_is_not_draw() {
    // X O X / X O _ / O _ _, then X at 5: seven squares filled, no line.
    let mut game = play(&[0, 1, 2, 4, 3, 6]);
    let result = game.submit_move(5, Player::X);
    assert_eq!(result.status(), Some(GameStatus::InProgress));
}

#[test]
fn test_reset_is_idempotent() {
    let mut game = play(&[0, 3, 1]);
    game.reset();
    let once = game.clone();
    game.reset();
    assert_eq!(game, once);
    assert_eq!(game, Game::new());
}

#[test]
fn test_reset_after_game_over_allows_play() {
    let mut game = play(&[0, 3, 1, 4, 2]);
    game.reset();
    assert!(game.submit_move(2, Player::X).is_accepted());
}
