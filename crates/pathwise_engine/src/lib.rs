//! Pathwise engine - win-path tracking for n-by-n tic-tac-toe
//!
//! The engine tracks every line each player can still complete and picks
//! moves from those lines without searching the game tree. It never loses:
//! every game it plays ends in a win for it or a draw.
//!
//! # Architecture
//!
//! - **Board**: n-by-n grid of cells, written once each
//! - **Path**: one row, column or diagonal with its rank (moves left)
//! - **PathSet**: a player's live lines ordered by rank
//! - **Engine**: board plus both path sets, move application and selection
//!
//! # Example
//!
//! ```
//! use pathwise_engine::{Coord, Engine, GameStatus, Player};
//!
//! let mut engine = Engine::new(3)?;
//! engine.apply_move(Coord::new(1, 1), Player::X)?;
//!
//! let reply = engine.suggest_move(Player::O).expect("game is open");
//! assert_eq!(engine.apply_move(reply, Player::O)?, GameStatus::Continue);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod decision;
mod engine;
mod error;
pub mod invariants;
mod path;
mod path_set;
mod threat;
mod types;

pub use action::Move;
pub use board::Board;
pub use decision::Decision;
pub use engine::{Engine, GameStatus};
pub use error::{InvalidSize, MIN_SIZE, MoveError};
pub use path::{Direction, Path, PathId};
pub use path_set::{Claim, Intersection, PathSet};
pub use threat::{double_threat, forces_win, is_safe};
pub use types::{Cell, CellKind, Coord, Player};
