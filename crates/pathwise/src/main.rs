//! Pathwise - unified CLI
//!
//! Terminal play and batch simulation against the path engine.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use pathwise::{FirstMover, SimulationConfig, Simulator, TerminalGame};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the board
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { size, second } => run_play(size, second),
        Command::Simulate {
            config,
            min_size,
            max_size,
            games,
            seed,
            first_mover,
            json,
        } => {
            let overrides = Overrides {
                min_size,
                max_size,
                games,
                seed,
                first_mover,
            };
            run_simulate(config, overrides, json)
        }
    }
}

/// Play one interactive game on stdin/stdout.
#[instrument]
fn run_play(size: usize, second: bool) -> Result<()> {
    info!("Starting terminal game");
    println!("\n[ TIC TAC TOE ]\n");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    TerminalGame::new(size, second, stdin.lock(), stdout.lock())?.play()?;

    println!("\nGoodbye! Thanks for playing!");
    Ok(())
}

/// Command-line values that replace config file settings.
#[derive(Debug)]
struct Overrides {
    min_size: Option<usize>,
    max_size: Option<usize>,
    games: Option<usize>,
    seed: Option<u64>,
    first_mover: Option<FirstMover>,
}

impl Overrides {
    fn apply(self, mut config: SimulationConfig) -> SimulationConfig {
        if let Some(min_size) = self.min_size {
            config = config.with_min_size(min_size);
        }
        if let Some(max_size) = self.max_size {
            config = config.with_max_size(max_size);
        }
        if let Some(games) = self.games {
            config = config.with_games_per_size(games);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(first_mover) = self.first_mover {
            config = config.with_first_mover(first_mover);
        }
        config
    }
}

/// Run a batch of simulated games and print the tally.
#[instrument(skip(overrides))]
fn run_simulate(config_path: Option<PathBuf>, overrides: Overrides, json: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => SimulationConfig::from_file(&path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    let config = overrides.apply(config);
    config.validate()?;
    info!(?config, "Starting simulation");

    let report = Simulator::new(config)
        .run()
        .context("Simulation aborted")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.table());
    }

    if report.losses() > 0 {
        bail!(
            "Engine lost {} of {} games",
            report.losses(),
            report.games()
        );
    }
    Ok(())
}
