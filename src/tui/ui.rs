//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::app::App;
use super::theme::Palette;
use crate::games::tictactoe::{GameStatus, Player, Position, Square};
use crate::store::KeyValueStore;

const HELP: &str =
    "arrows/1-9 move · enter play · n new · a opponent · c symbol · r reset score · t theme · q quit";

/// Renders the whole screen for `app`.
pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let palette = app.theme().palette();
    let area = frame.area();
    let base = Style::default().fg(palette.foreground).bg(palette.background);
    frame.render_widget(Block::default().style(base), area);

    let opponent_mode = *app.session().mode().opponent_enabled();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            // Title
            Constraint::Length(2),
            // Turn indicator
            Constraint::Length(1),
            // Board
            Constraint::Min(11),
            // Status
            Constraint::Length(3),
            // Scoreboard
            Constraint::Length(if opponent_mode { 3 } else { 0 }),
            // Help
            Constraint::Length(1),
        ])
        .split(area);

    let mode = if opponent_mode {
        format!("vs computer (you are {})", app.session().mode().human())
    } else {
        "two players".to_string()
    };
    let title = Paragraph::new(format!(
        "Tic Tac Toe · {} · {} theme",
        mode,
        app.theme().label()
    ))
        .style(base.add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_turn_indicator(frame, chunks[1], app, &palette);
    draw_board(frame, chunks[2], app, &palette);

    let status = Paragraph::new(app.status_line())
        .style(base)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    if opponent_mode {
        draw_scoreboard(frame, chunks[4], app, &palette);
    }

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(palette.muted).bg(palette.background))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[5]);

    if app.choosing_symbol() {
        draw_symbol_prompt(frame, area, &palette);
    }
}

fn mark_color(player: Player, palette: &Palette) -> ratatui::style::Color {
    match player {
        Player::X => palette.x,
        Player::O => palette.o,
    }
}

fn draw_turn_indicator<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    app: &App<S>,
    palette: &Palette,
) {
    let session = app.session();
    let over = session.status().is_terminal();
    let span = |player: Player| {
        let mut style = Style::default().fg(mark_color(player, palette)).bg(palette.background);
        if !over && session.to_move() == player {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        Span::styled(format!("  {}  ", player), style)
    };
    let line = Line::from(vec![span(Player::X), Span::raw("   "), span(Player::O)]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_board<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, palette: &Palette) {
    let board_area = center_rect(area, 41, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, chunk) in Position::ALL.chunks(3).enumerate() {
        draw_row(frame, rows[row * 2], app, palette, chunk);
        if row < 2 {
            let sep = Paragraph::new("─".repeat(41)).style(Style::default().fg(palette.muted));
            frame.render_widget(sep, rows[row * 2 + 1]);
        }
    }
}

fn draw_row<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    app: &App<S>,
    palette: &Palette,
    positions: &[Position],
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(13),
            Constraint::Length(1),
            Constraint::Length(13),
            Constraint::Length(1),
            Constraint::Length(13),
        ])
        .split(area);

    for (i, pos) in positions.iter().enumerate() {
        draw_cell(frame, cols[i * 2], app, palette, *pos);
        if i < 2 {
            let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(palette.muted));
            frame.render_widget(sep, cols[i * 2 + 1]);
        }
    }
}

fn draw_cell<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    app: &App<S>,
    palette: &Palette,
    pos: Position,
) {
    let session = app.session();
    let (symbol, mut style) = match session.board().get(pos) {
        Square::Empty => (
            (pos.to_index() + 1).to_string(),
            Style::default().fg(palette.muted),
        ),
        Square::Occupied(player) => (
            player.to_string(),
            Style::default()
                .fg(mark_color(player, palette))
                .add_modifier(Modifier::BOLD),
        ),
    };

    let on_winning_line = matches!(
        session.status(),
        GameStatus::Won { line, .. } if line.contains(pos)
    );
    style = if on_winning_line {
        style.bg(palette.winning).fg(palette.background)
    } else if pos == app.cursor() && session.awaiting_human() {
        style.bg(palette.cursor)
    } else {
        style.bg(palette.background)
    };

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!(" {} ", symbol), style)),
        Line::from(""),
    ])
    .style(Style::default().bg(style.bg.unwrap_or(palette.background)))
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn draw_scoreboard<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    app: &App<S>,
    palette: &Palette,
) {
    let score = app.session().score();
    let text = Line::from(vec![
        Span::styled(format!("You {}", score.human_wins()), Style::default().fg(palette.x)),
        Span::raw("   "),
        Span::styled(format!("Computer {}", score.opponent_wins()), Style::default().fg(palette.o)),
        Span::raw("   "),
        Span::raw(format!("Draws {}", score.draws())),
    ]);
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Score"));
    frame.render_widget(paragraph, area);
}

fn draw_symbol_prompt(frame: &mut Frame, area: Rect, palette: &Palette) {
    let popup = center_rect(area, 36, 5);
    frame.render_widget(Clear, popup);
    let prompt = Paragraph::new("Play as X or O?\n\npress x or o (esc keeps current)")
        .style(Style::default().fg(palette.foreground).bg(palette.background))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Choose your symbol"));
    frame.render_widget(prompt, popup);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::opponent::HeuristicOpponent;
    use crate::scheduler::OpponentScheduler;
    use crate::score::ScoreRepository;
    use crate::session::GameSession;
    use crate::store::MemoryStore;

    fn screen_text(app: &App<MemoryStore>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_title_shows_mode_and_theme() {
        let (scheduler, _rx) = OpponentScheduler::new(Duration::from_millis(250));
        let session = GameSession::new(
            ScoreRepository::new(MemoryStore::new()),
            HeuristicOpponent::new(),
            scheduler,
        );
        let mut app = App::new(session);
        assert!(screen_text(&app).contains("two players · light theme"));

        app.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE));
        assert!(screen_text(&app).contains("two players · dark theme"));
    }
}
