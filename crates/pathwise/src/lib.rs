//! Pathwise drivers - terminal play and batch simulation
//!
//! # Architecture
//!
//! - **Terminal**: one human against the engine over text prompts
//! - **Simulation**: seeded random opponents across a range of board sizes
//! - **Config**: TOML settings for simulation runs
//!
//! # Example
//!
//! ```
//! use pathwise::{SimulationConfig, Simulator};
//!
//! let config = SimulationConfig::default()
//!     .with_max_size(4)
//!     .with_games_per_size(4);
//! let report = Simulator::new(config).run()?;
//! assert_eq!(report.losses(), 0);
//! # Ok::<(), pathwise::SimulationError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod simulation;
mod terminal;

// Crate-level exports - Configuration
pub use config::{ConfigError, FirstMover, SimulationConfig};

// Crate-level exports - Simulation
pub use simulation::{Outcome, SimulationError, SimulationReport, Simulator, SizeReport};

// Crate-level exports - Terminal play
pub use terminal::TerminalGame;
