//! Terminal UI for tic-tac-toe duel.

mod app;
mod input;
mod terminal;
mod theme;
mod ui;

pub use app::App;
pub use theme::{Palette, Theme};

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tracing::{error, info, instrument};

use self::terminal::TerminalRestore;
use crate::config::AppConfig;
use crate::opponent::HeuristicOpponent;
use crate::scheduler::{OpponentDue, OpponentScheduler};
use crate::score::ScoreRepository;
use crate::session::GameSession;
use crate::store::{KeyValueStore, SqliteStore};

/// Runs the terminal UI until the user quits.
///
/// Logs go to the configured log file so they do not corrupt the screen.
pub async fn run_tui(config: AppConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file '{}'", config.log_file()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(?config, "Starting tic-tac-toe TUI");

    let store = SqliteStore::open(config.database_path().clone())?;
    let (scheduler, mut due_rx) = OpponentScheduler::new(config.opponent_delay());
    let mut session = GameSession::new(
        ScoreRepository::new(store),
        HeuristicOpponent::new(),
        scheduler,
    );
    if *config.opponent_mode() {
        session.set_opponent_mode(true);
        session.choose_human_symbol(*config.human_symbol());
    }
    let mut app = App::new(session);

    enable_raw_mode()?;
    let restore = TerminalRestore::new(|| {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, Show)
    });
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &mut app, &mut due_rx).await;

    restore.finish()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!(score = ?app.session().score(), "Leaving TUI");
    res
}

/// Draw, apply due opponent moves, then poll one key; repeat until quit.
#[instrument(skip_all)]
async fn run_loop<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S>,
    due_rx: &mut mpsc::UnboundedReceiver<OpponentDue>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        while let Ok(due) = due_rx.try_recv() {
            app.on_opponent_due(due);
        }

        // Poll for input with short timeout to keep the loop responsive.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Skip key release events (crossterm fires both press and release).
                if key.kind != KeyEventKind::Release {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit() {
            info!("User quit");
            return Ok(());
        }

        sleep(Duration::from_millis(10)).await;
    }
}
