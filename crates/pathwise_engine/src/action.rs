//! First-class move records.
//!
//! Moves are domain events: the engine keeps them as history, the invariants
//! replay them, and the drivers log them.

use super::{Coord, Player};
use serde::{Deserialize, Serialize};

/// A player placing their mark at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The cell the player takes.
    pub coord: Coord,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, coord: impl Into<Coord>) -> Self {
        Self {
            player,
            coord: coord.into(),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.coord)
    }
}
