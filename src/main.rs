use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use snake::app::{App, CANVAS_HEIGHT, CANVAS_WIDTH};
use snake::term::TermManager;
use snake::{Game, RandomApples};

/// Classic snake in the terminal
#[derive(Parser, Debug)]
#[command(name = "snake")]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for apple placement (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write logs to this file; filter with RUST_LOG (default: info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let apples = match args.seed {
        Some(seed) => RandomApples::seeded(seed),
        None => RandomApples::from_random(),
    };
    info!(seed = ?apples.seed(), "starting");

    let mut term = TermManager::new(CANVAS_WIDTH, CANVAS_HEIGHT)?;
    let result = term
        .setup()
        .and_then(|()| App::new(&mut term, Game::new(apples)).run());

    // Always try to restore the terminal, even if setup or the game loop failed.
    let restored = term.restore();
    info!("exiting");
    result.and(restored)
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
