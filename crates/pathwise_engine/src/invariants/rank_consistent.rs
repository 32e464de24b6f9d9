//! Rank invariant: path sets agree with the board.

use super::Invariant;
use crate::{Cell, Engine, Path, Player};
use strum::IntoEnumIterator;

/// Invariant: every player's path set holds exactly the lines free of
/// opponent marks, each ranked by the owner's missing cells.
pub struct RankConsistentInvariant;

impl RankConsistentInvariant {
    fn holds_for(engine: &Engine, player: Player) -> bool {
        let board = engine.board();
        let set = engine.paths(player);

        let expected = Path::all(engine.size())
            .into_iter()
            .filter(|line| {
                line.cells()
                    .iter()
                    .all(|c| board.get(*c) != Some(Cell::Occupied(player.opponent())))
            })
            .count();
        if set.len() != expected {
            return false;
        }

        set.iter().all(|path| {
            let owned = path
                .cells()
                .iter()
                .filter(|c| board.get(**c) == Some(Cell::Occupied(player)))
                .count();
            let contested = path
                .cells()
                .iter()
                .any(|c| board.get(*c) == Some(Cell::Occupied(player.opponent())));
            !contested && path.rank() == engine.size() - owned
        })
    }
}

impl Invariant<Engine> for RankConsistentInvariant {
    fn holds(engine: &Engine) -> bool {
        Player::iter().all(|player| Self::holds_for(engine, player))
    }

    fn description() -> &'static str {
        "Path ranks match the board and contested lines are gone"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coord;

    #[test]
    fn test_holds_through_a_game() {
        let mut engine = Engine::new(4).unwrap();
        for (row, col) in [(0, 0), (1, 1), (0, 1), (2, 2), (3, 3), (0, 2)] {
            let player = engine.to_move();
            engine.apply_move(Coord::new(row, col), player).unwrap();
            assert!(RankConsistentInvariant::holds(&engine));
        }
    }

    #[test]
    fn test_unrecorded_cell_violates() {
        let mut engine = Engine::new(3).unwrap();
        engine.corrupt_board(Coord::new(1, 1), Player::X);
        assert!(!RankConsistentInvariant::holds(&engine));
    }
}
