//! Tic-tac-toe duel - terminal game entry point.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use tictactoe_duel::{AppConfig, Cli, Command, ScoreRepository, SqliteStore, run_tui};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(db_path) = cli.db_path {
        config = config.with_database_path(db_path);
    }

    match cli.command.unwrap_or(Command::Play {
        opponent: false,
        symbol: None,
        delay_ms: None,
    }) {
        Command::Play {
            opponent,
            symbol,
            delay_ms,
        } => {
            if let Some(human) = symbol {
                config = config.with_opponent(human);
            } else if opponent {
                let human = *config.human_symbol();
                config = config.with_opponent(human);
            }
            if let Some(ms) = delay_ms {
                config = config.with_opponent_delay_ms(ms);
            }
            run_tui(config).await
        }
        Command::Score => show_score(&config),
        Command::ResetScore => reset_score(&config),
    }
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Prints the saved score.
#[instrument(skip(config))]
fn show_score(config: &AppConfig) -> Result<()> {
    init_stderr_logging();
    let repo = ScoreRepository::new(SqliteStore::open(config.database_path().clone())?);
    let score = repo.load();
    println!(
        "You: {}  Computer: {}  Draws: {}  (games: {})",
        score.human_wins(),
        score.opponent_wins(),
        score.draws(),
        score.total()
    );
    Ok(())
}

/// Zeroes the saved score.
#[instrument(skip(config))]
fn reset_score(config: &AppConfig) -> Result<()> {
    init_stderr_logging();
    let mut repo = ScoreRepository::new(SqliteStore::open(config.database_path().clone())?);
    repo.save(&Default::default())?;
    info!("Score reset");
    println!("Score reset.");
    Ok(())
}
