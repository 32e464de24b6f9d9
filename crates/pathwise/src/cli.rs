//! Command-line interface for pathwise.

use clap::{Parser, Subcommand};
use pathwise::FirstMover;
use std::path::PathBuf;

/// Pathwise - n-by-n tic-tac-toe that never loses
#[derive(Parser, Debug)]
#[command(name = "pathwise")]
#[command(about = "Play or simulate n-by-n tic-tac-toe against the path engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one game in the terminal
    Play {
        /// Board side length
        #[arg(short, long, default_value = "3")]
        size: usize,

        /// Computer moves second, so the human opens as X
        #[arg(long)]
        second: bool,
    },

    /// Run random opponents against the engine and tally the results
    Simulate {
        /// Path to a TOML simulation config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Smallest board size (overrides config)
        #[arg(long)]
        min_size: Option<usize>,

        /// Largest board size (overrides config)
        #[arg(long)]
        max_size: Option<usize>,

        /// Games per board size (overrides config)
        #[arg(short, long)]
        games: Option<usize>,

        /// Seed for the random opponent (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Who opens each game (overrides config)
        #[arg(long, value_enum)]
        first_mover: Option<FirstMover>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
