//! Chess - play a game of chess in the terminal.
//!
//! Reads commands from stdin and prints the board after every move. Moves
//! given on the command line are played before the prompt starts.

mod command;
mod config;
mod render;
mod session;

use anyhow::{bail, Context};
use chess_rules::GameState;
use clap::Parser;
use config::CliConfig;
use session::Session;
use std::io;
use std::path::PathBuf;

/// Chess - a two-player game in the terminal.
#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Play chess in the terminal")]
struct Args {
    /// Path to the TOML configuration file [default: chess.toml]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start from this FEN position instead of the configured one
    #[arg(long)]
    fen: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the move history as JSON on exit
    #[arg(long)]
    json: bool,

    /// Moves to play before reading commands, e.g. e4 e5 Nf3
    moves: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(CliConfig::config_path);
    let config = CliConfig::load_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let level_name = args.log_level.as_deref().unwrap_or(&config.log_level);
    let level: tracing::Level = level_name
        .parse()
        .with_context(|| format!("unknown log level '{}'", level_name))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let game = match args.fen.as_deref().or(config.start_fen.as_deref()) {
        Some(fen) => GameState::from_fen(fen).context("invalid start position")?,
        None => GameState::new(),
    };
    tracing::info!(fen = %game.to_fen(), "starting game");

    let mut session = Session::new(game, config.display);
    for token in &args.moves {
        if let Err(err) = session.play(token) {
            bail!("cannot play '{}': {}", token, err);
        }
    }

    let stdin = io::stdin();
    session.run(stdin.lock(), io::stdout().lock())?;

    if args.json {
        let moves: Vec<_> = session.game().moves().collect();
        println!("{}", serde_json::to_string_pretty(&moves)?);
    }
    Ok(())
}
