//! Strictly Solo - tic-tac-toe against a random computer opponent.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_solo::{Settings, simulate};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut settings = Settings::load_or_default(&cli.config)?;

    match cli.command {
        Command::Play { seed, mute } => {
            if mute {
                settings.mute();
            }
            tui::run_tui(&settings, seed).await
        }
        Command::Simulate { games, seed } => run_simulation(&settings, games, seed),
    }
}

/// Play `games` headless games and print the tally
#[instrument(skip(settings))]
fn run_simulation(settings: &Settings, games: usize, seed: u64) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(games, seed, "Starting simulation");
    let tally = simulate(games, seed);
    println!("{}", tally);
    Ok(())
}
