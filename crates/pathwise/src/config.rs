//! Simulation configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use pathwise_engine::{MIN_SIZE, Player};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Who opens each simulated game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FirstMover {
    /// Computer and opponent take turns opening, game by game.
    #[default]
    #[display("alternate")]
    Alternate,
    /// The computer always plays X.
    #[display("computer")]
    Computer,
    /// The opponent always plays X.
    #[display("human")]
    Human,
}

impl FirstMover {
    /// The side the computer plays in game number `game`.
    pub fn computer_side(self, game: usize) -> Player {
        match self {
            FirstMover::Computer => Player::X,
            FirstMover::Human => Player::O,
            FirstMover::Alternate if game % 2 == 0 => Player::X,
            FirstMover::Alternate => Player::O,
        }
    }
}

/// Settings for a batch of simulated games.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct SimulationConfig {
    /// Smallest board size simulated.
    #[serde(default = "default_min_size")]
    min_size: usize,

    /// Largest board size simulated.
    #[serde(default = "default_max_size")]
    max_size: usize,

    /// Games played per board size.
    #[serde(default = "default_games_per_size")]
    games_per_size: usize,

    /// Seed for the opponent's random moves.
    #[serde(default)]
    seed: u64,

    /// Who opens each game.
    #[serde(default)]
    first_mover: FirstMover,
}

fn default_min_size() -> usize {
    MIN_SIZE
}

fn default_max_size() -> usize {
    9
}

fn default_games_per_size() -> usize {
    100
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_size: default_min_size(),
            max_size: default_max_size(),
            games_per_size: default_games_per_size(),
            seed: 0,
            first_mover: FirstMover::default(),
        }
    }
}

impl SimulationConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            min_size = config.min_size,
            max_size = config.max_size,
            games_per_size = config.games_per_size,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Checks that the ranges make sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_size < MIN_SIZE {
            return Err(ConfigError::new(format!(
                "min_size must be at least {}, got {}",
                MIN_SIZE, self.min_size
            )));
        }
        if self.min_size > self.max_size {
            return Err(ConfigError::new(format!(
                "min_size {} exceeds max_size {}",
                self.min_size, self.max_size
            )));
        }
        if self.games_per_size == 0 {
            return Err(ConfigError::new("games_per_size must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Board sizes covered, smallest first.
    pub fn sizes(&self) -> std::ops::RangeInclusive<usize> {
        self.min_size..=self.max_size
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_three_to_nine() {
        let config = SimulationConfig::default();
        assert_eq!(config.sizes(), 3..=9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: SimulationConfig =
            toml::from_str("games_per_size = 5\nfirst_mover = \"human\"\n").unwrap();
        assert_eq!(*config.games_per_size(), 5);
        assert_eq!(*config.first_mover(), FirstMover::Human);
        assert_eq!(*config.min_size(), 3);
        assert_eq!(*config.seed(), 0);
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let config = SimulationConfig::default().with_min_size(2);
        assert!(config.validate().is_err());

        let config = SimulationConfig::default().with_min_size(6).with_max_size(5);
        assert!(config.validate().is_err());

        let config = SimulationConfig::default().with_games_per_size(0);
        let err = config.validate().unwrap_err();
        assert!(err.message.contains("games_per_size"));
    }

    #[test]
    fn test_alternating_sides() {
        assert_eq!(FirstMover::Alternate.computer_side(0), Player::X);
        assert_eq!(FirstMover::Alternate.computer_side(1), Player::O);
        assert_eq!(FirstMover::Human.computer_side(0), Player::O);
        assert_eq!(FirstMover::Computer.computer_side(7), Player::X);
    }
}
