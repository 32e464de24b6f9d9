//! Randomised games against the engine.
//!
//! The opponent picks uniformly among empty cells using a seeded RNG, so a
//! given config always replays the same games.

use crate::config::SimulationConfig;
use derive_getters::Getters;
use derive_more::{Display, Error, From};
use pathwise_engine::{Engine, GameStatus, InvalidSize, MoveError, Player};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Result of one game, from the computer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum Outcome {
    /// The computer completed a line.
    #[display("win")]
    Win,
    /// Nobody completed a line.
    #[display("draw")]
    Draw,
    /// The opponent completed a line.
    #[display("loss")]
    Loss,
}

/// Tally for one board size.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct SizeReport {
    /// Board size.
    size: usize,
    /// Games played.
    games: usize,
    /// Games the computer won.
    wins: usize,
    /// Drawn games.
    draws: usize,
    /// Games the computer lost.
    losses: usize,
}

impl SizeReport {
    fn new(size: usize) -> Self {
        Self {
            size,
            games: 0,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    fn record(&mut self, outcome: Outcome) {
        self.games += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
    }
}

/// Tallies for a whole simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct SimulationReport {
    /// Seed the opponent's moves were drawn from.
    seed: u64,
    /// One entry per board size, smallest first.
    sizes: Vec<SizeReport>,
}

impl SimulationReport {
    /// Games lost across every size.
    pub fn losses(&self) -> usize {
        self.sizes.iter().map(|s| s.losses).sum()
    }

    /// Games played across every size.
    pub fn games(&self) -> usize {
        self.sizes.iter().map(|s| s.games).sum()
    }

    /// Plain-text table, one row per size.
    pub fn table(&self) -> String {
        let mut out = format!(
            "{:>4}  {:>6}  {:>6}  {:>6}  {:>6}\n",
            "size", "games", "wins", "draws", "losses"
        );
        for s in &self.sizes {
            out.push_str(&format!(
                "{:>4}  {:>6}  {:>6}  {:>6}  {:>6}\n",
                s.size, s.games, s.wins, s.draws, s.losses
            ));
        }
        out
    }
}

/// Engine failure during a simulated game.
#[derive(Debug, Clone, Display, Error, From)]
pub enum SimulationError {
    /// Board size rejected by the engine.
    #[display("Simulation setup failed: {}", _0)]
    Size(InvalidSize),
    /// A move the driver believed legal was rejected.
    #[display("Simulation move rejected: {}", _0)]
    Move(MoveError),
}

/// Plays configured batches of games against a random opponent.
#[derive(Debug)]
pub struct Simulator {
    config: SimulationConfig,
    rng: StdRng,
}

impl Simulator {
    /// Creates a simulator seeded from the config.
    pub fn new(config: SimulationConfig) -> Self {
        let rng = StdRng::seed_from_u64(*config.seed());
        Self { config, rng }
    }

    /// Plays every configured game.
    #[instrument(skip(self), fields(seed = self.config.seed()))]
    pub fn run(&mut self) -> Result<SimulationReport, SimulationError> {
        let mut sizes = Vec::new();
        for size in self.config.sizes() {
            let mut report = SizeReport::new(size);
            for game in 0..*self.config.games_per_size() {
                let computer = self.config.first_mover().computer_side(game);
                let outcome = self.play_game(size, computer)?;
                if outcome == Outcome::Loss {
                    warn!(size, game, %computer, "Computer lost");
                }
                report.record(outcome);
            }
            info!(
                size,
                wins = report.wins,
                draws = report.draws,
                losses = report.losses,
                "Finished size"
            );
            sizes.push(report);
        }
        Ok(SimulationReport {
            seed: *self.config.seed(),
            sizes,
        })
    }

    /// Plays one game with the computer on `computer`'s side.
    #[instrument(skip(self))]
    pub fn play_game(&mut self, size: usize, computer: Player) -> Result<Outcome, SimulationError> {
        let mut engine = Engine::new(size)?;
        loop {
            let mover = engine.to_move();
            let coord = if mover == computer {
                match engine.suggest_move(computer) {
                    Some(coord) => coord,
                    // Neither side can complete a line
                    None => return Ok(Outcome::Draw),
                }
            } else {
                let empty: Vec<_> = engine.board().empty_cells().collect();
                match empty.choose(&mut self.rng) {
                    Some(coord) => *coord,
                    None => return Ok(Outcome::Draw),
                }
            };

            match engine.apply_move(coord, mover)? {
                GameStatus::Continue => {}
                GameStatus::Draw => return Ok(Outcome::Draw),
                GameStatus::Win(winner) => {
                    debug!(%winner, moves = engine.history().len(), "Game won");
                    return Ok(if winner == computer {
                        Outcome::Win
                    } else {
                        Outcome::Loss
                    });
                }
            }
        }
    }
}
