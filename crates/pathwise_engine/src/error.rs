//! Error types for the engine boundary.

use super::{Coord, Player};
use derive_more::{Display, Error};

/// Smallest supported board size.
pub const MIN_SIZE: usize = 3;

/// Board size rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Board size {} is below the minimum of {}", size, MIN_SIZE)]
pub struct InvalidSize {
    /// The rejected size.
    pub size: usize,
}

/// Error that can occur when validating or applying a move.
///
/// These are caller errors: the driver recovers by asking for another move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MoveError {
    /// The cell is already owned by a player.
    #[display("Cell {} is already occupied", _0)]
    OccupiedCell(Coord),

    /// The coordinate is not on the board.
    #[display("Cell {} is off the board", _0)]
    OutOfBounds(Coord),

    /// It's not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(Player),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}
