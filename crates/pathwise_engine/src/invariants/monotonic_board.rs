//! Monotonic board invariant: cells never change once set.

use super::Invariant;
use crate::{Board, Engine};

/// Invariant: the board is exactly the move history replayed.
///
/// Replaying fails if any move lands on a taken cell, so a board that
/// matches its replay has never had a cell overwritten.
pub struct MonotonicBoardInvariant;

impl Invariant<Engine> for MonotonicBoardInvariant {
    fn holds(engine: &Engine) -> bool {
        let Ok(mut replayed) = Board::new(engine.size()) else {
            return false;
        };
        for mv in engine.history() {
            if replayed.place(mv.coord, mv.player).is_err() {
                return false;
            }
        }
        replayed == *engine.board()
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}
