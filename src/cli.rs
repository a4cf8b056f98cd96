//! Command-line interface for strictly_solo.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Solo - tic-tac-toe against a random opponent
#[derive(Parser, Debug)]
#[command(name = "strictly_solo")]
#[command(about = "Tic-tac-toe against a computer that moves at random", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (TOML). Missing file means defaults.
    #[arg(short, long, default_value = "strictly_solo.toml", global = true)]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Seed for the computer's moves (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Disable the terminal bell
        #[arg(long)]
        mute: bool,
    },

    /// Play many games headless and print the outcome counts
    Simulate {
        /// Number of games to play
        #[arg(short, long, default_value = "1000")]
        games: usize,

        /// Seed for both sides
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}
