use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use reversi_env::config::Config;
use reversi_env::input::{InputProvider, KeyReader, LineReader};
use reversi_env::render::ConsoleRenderer;
use reversi_env::session::{InputMode, Session};
use reversi_env::{Player, ReversiEngine};

#[derive(Parser, Debug)]
#[command(about = "Play Reversi in the terminal")]
struct Args {
    /// Board size (even, at least 4)
    #[arg(long, short = 'n')]
    size: Option<usize>,

    /// Random seed for the starting-player draw
    #[arg(long)]
    seed: Option<u64>,

    /// Side that moves first (random when omitted)
    #[arg(long)]
    first: Option<Side>,

    /// How moves are entered
    #[arg(long, value_enum, default_value_t = Mode::Text)]
    mode: Mode,

    /// JSON config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    A,
    B,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Arrow keys move a cursor, Enter places
    Cursor,
    /// Type coordinates such as B3
    Text,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    tracing::info!(?config, "starting session");

    let engine = ReversiEngine::new(config, Box::new(ConsoleRenderer::stdout()))
        .context("failed to create game")?;

    let stdin = io::stdin().lock();
    let (input, mode): (Box<dyn InputProvider>, InputMode) = match args.mode {
        Mode::Cursor => {
            println!("Arrow keys move the cursor, Enter places, q quits.");
            (Box::new(KeyReader::new(stdin)), InputMode::Cursor)
        }
        Mode::Text => {
            println!("Enter a cell such as B3, or quit.");
            (Box::new(LineReader::new(stdin)), InputMode::Text)
        }
    };

    let mut session = Session::new(engine, input, io::stdout(), mode);
    let summary = session.run()?;
    tracing::info!(
        moves = summary.moves,
        terminal = summary.terminal,
        "session finished"
    );

    Ok(())
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    if let Some(size) = args.size {
        config.size = size;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(side) = args.first {
        config.first_player = Some(match side {
            Side::A => Player::A,
            Side::B => Player::B,
        });
    }
    Ok(config)
}
