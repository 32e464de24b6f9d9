//! Move selection as a small enumerated decision procedure.
//!
//! Rules are tried in order and the first that applies wins:
//!
//! 1. Opening book for the computer's first move.
//! 2. Win: complete one of our rank-1 lines.
//! 3. Block: take the missing cell of an opponent rank-1 line.
//! 4. Fork: a cell that leaves us two distinct one-move wins.
//! 5. Intersect: the cell shared by both sides' lines with the lowest
//!    combined rank, or failing that the next cell of our best line, then
//!    of the opponent's best line.
//!
//! Step 5 candidates go through a safety filter: a cell after which the
//! opponent can force a win by a run of threats is skipped in favour of the
//! next safe one, and the choice is reported as [`Decision::Guard`].

use super::{CellKind, Coord, Engine, GameStatus, Player, threat};
use tracing::{debug, instrument};

/// A selected move and the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
pub enum Decision {
    /// Fixed reply for the computer's first move.
    Opening(Coord),
    /// Completes one of our lines.
    Win(Coord),
    /// Stops an opponent line one move from completion.
    Block(Coord),
    /// Creates two threats at once.
    Fork(Coord),
    /// Most urgent cell shared by both sides' lines.
    Intersect(Coord),
    /// Safe replacement for a preferred cell that loses to a forcing line.
    Guard(Coord),
    /// Next cell of the best remaining line when no cell is shared.
    Fallback(Coord),
    /// Neither side can complete a line; no move is suggested.
    Draw,
    /// The game is already won.
    Finished,
}

impl Decision {
    /// The selected cell, if any.
    pub fn coord(&self) -> Option<Coord> {
        match *self {
            Decision::Opening(c)
            | Decision::Win(c)
            | Decision::Block(c)
            | Decision::Fork(c)
            | Decision::Intersect(c)
            | Decision::Guard(c)
            | Decision::Fallback(c) => Some(c),
            Decision::Draw | Decision::Finished => None,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.coord() {
            Some(c) => write!(f, "{} {}", self.as_ref(), c),
            None => write!(f, "{}", self.as_ref()),
        }
    }
}

/// Picks a move for `player` on the current position.
#[instrument(skip(engine), fields(size = engine.size(), moves = engine.history().len()))]
pub fn decide(engine: &Engine, player: Player) -> Decision {
    let decision = select(engine, player);
    debug!(%decision, "Selected move");
    decision
}

fn select(engine: &Engine, player: Player) -> Decision {
    match engine.status() {
        GameStatus::Continue => {}
        GameStatus::Draw => return Decision::Draw,
        GameStatus::Win(_) => return Decision::Finished,
    }
    if let Some(c) = opening(engine, player) {
        return Decision::Opening(c);
    }

    let own = engine.paths(player);
    let theirs = engine.paths(player.opponent());
    if let Some(&c) = own.winning_cells().first() {
        return Decision::Win(c);
    }
    if let Some(&c) = theirs.winning_cells().first() {
        return Decision::Block(c);
    }
    if let Some(c) = threat::double_threat(engine, player) {
        return Decision::Fork(c);
    }

    let shared = own.intersections_with(theirs);
    let preferred: fn(Coord) -> Decision = if shared.is_empty() {
        Decision::Fallback
    } else {
        Decision::Intersect
    };

    let mut candidates: Vec<Coord> = shared.iter().map(|i| i.coord).collect();
    for c in own.open_cells().into_iter().chain(theirs.open_cells()) {
        if !candidates.contains(&c) {
            candidates.push(c);
        }
    }
    let Some(&first) = candidates.first() else {
        return Decision::Draw;
    };

    let spare: Vec<Coord> = engine
        .board()
        .empty_cells()
        .filter(|c| !candidates.contains(c))
        .collect();
    let safe = candidates
        .iter()
        .chain(&spare)
        .copied()
        .find(|&c| threat::is_safe(engine, player, c));

    match safe {
        Some(c) if c != first => {
            debug!(preferred = %first, chosen = %c, "Preferred cell loses to a forcing line");
            Decision::Guard(c)
        }
        _ => preferred(first),
    }
}

/// Book move for the computer's first turn, if this is it.
fn opening(engine: &Engine, player: Player) -> Option<Coord> {
    let board = engine.board();
    let last = engine.size() - 1;
    let corners = [
        Coord::new(0, 0),
        Coord::new(0, last),
        Coord::new(last, 0),
        Coord::new(last, last),
    ];

    match (player, engine.history()) {
        (Player::X, []) => Some(corners[0]),
        (Player::O, [first]) => {
            let opened = first.coord;
            match opened.kind(engine.size()) {
                CellKind::Edge => board
                    .empty_cells()
                    .find(|c| c.kind(engine.size()) == CellKind::Center),
                CellKind::Corner => {
                    let step = |i: usize| if i == 0 { 1 } else { i - 1 };
                    Some(Coord::new(step(opened.row), step(opened.col)))
                }
                CellKind::Center => corners.into_iter().find(|c| board.is_empty(*c)),
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(size: usize, moves: &[(usize, usize)]) -> Engine {
        let mut engine = Engine::new(size).unwrap();
        for &(row, col) in moves {
            let player = engine.to_move();
            engine.apply_move(Coord::new(row, col), player).unwrap();
        }
        engine
    }

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn test_x_opens_in_corner() {
        for size in 3..=9 {
            let engine = Engine::new(size).unwrap();
            assert_eq!(engine.decide(Player::X), Decision::Opening(c(0, 0)));
        }
    }

    #[test]
    fn test_o_answers_edge_with_centre() {
        let engine = engine_with(3, &[(0, 1)]);
        assert_eq!(engine.decide(Player::O), Decision::Opening(c(1, 1)));

        let engine = engine_with(4, &[(0, 2)]);
        assert_eq!(engine.decide(Player::O), Decision::Opening(c(1, 1)));
    }

    #[test]
    fn test_o_answers_corner_inward() {
        let engine = engine_with(3, &[(2, 0)]);
        assert_eq!(engine.decide(Player::O), Decision::Opening(c(1, 1)));

        let engine = engine_with(5, &[(4, 4)]);
        assert_eq!(engine.decide(Player::O), Decision::Opening(c(3, 3)));
    }

    #[test]
    fn test_o_answers_centre_with_corner() {
        let engine = engine_with(3, &[(1, 1)]);
        assert_eq!(engine.decide(Player::O), Decision::Opening(c(0, 0)));
    }

    #[test]
    fn test_win_beats_block() {
        // X: (0,0), (0,1); O: (1,0), (1,1). X to move can win at (0,2).
        let engine = engine_with(3, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(engine.decide(Player::X), Decision::Win(c(0, 2)));
    }

    #[test]
    fn test_block() {
        let engine = engine_with(3, &[(0, 0), (1, 1), (0, 1)]);
        assert_eq!(engine.decide(Player::O), Decision::Block(c(0, 2)));
    }

    #[test]
    fn test_fork() {
        // X: (0,0), (0,2); O: (0,1), (1,0). (2,2) opens column 2 and the diagonal.
        let engine = engine_with(3, &[(0, 0), (0, 1), (0, 2), (1, 0)]);
        assert_eq!(engine.decide(Player::X), Decision::Fork(c(2, 2)));
    }

    #[test]
    fn test_edge_after_opposite_corners() {
        // X (0,0), O (1,1), X (2,2): every corner loses for O
        let engine = engine_with(3, &[(0, 0), (1, 1), (2, 2)]);
        assert!(!threat::is_safe(&engine, Player::O, c(0, 2)));
        assert_eq!(engine.decide(Player::O), Decision::Intersect(c(0, 1)));
        assert_eq!(c(0, 1).kind(3), CellKind::Edge);
    }

    #[test]
    fn test_guard_replaces_losing_cell() {
        // X (1,2), O (2,0). The weight-4 cells in row-major order are
        // (0,2), (1,0), (1,1), (2,2); the first two hand O a forcing line.
        let engine = engine_with(3, &[(1, 2), (2, 0)]);
        let shared: Vec<Coord> = engine
            .paths(Player::X)
            .intersections_with(engine.paths(Player::O))
            .iter()
            .map(|i| i.coord)
            .collect();
        assert_eq!(&shared[..3], &[c(0, 2), c(1, 0), c(1, 1)]);
        assert!(!threat::is_safe(&engine, Player::X, c(0, 2)));
        assert!(!threat::is_safe(&engine, Player::X, c(1, 0)));
        assert_eq!(engine.decide(Player::X), Decision::Guard(c(1, 1)));
    }

    #[test]
    fn test_intersect_lowest_weight_then_row_major() {
        // X (2,1), O (1,2): (1,1) and (2,2) both weigh 2 + 2
        let engine = engine_with(3, &[(2, 1), (1, 2)]);
        let first = engine.paths(Player::X).intersections_with(engine.paths(Player::O))[0];
        assert_eq!((first.coord, first.weight, first.own_rank), (c(1, 1), 4, 2));
        assert_eq!(engine.decide(Player::X), Decision::Intersect(c(1, 1)));

        let engine = engine_with(4, &[(0, 1), (2, 3)]);
        assert_eq!(engine.decide(Player::X), Decision::Intersect(c(0, 3)));
    }

    #[test]
    fn test_intersect_prefers_own_progress_on_ties() {
        // X (1,2), O (1,0): (0,0) is 3 + 2 and (0,2) is 2 + 3. Row-major
        // order alone would pick (0,0).
        let engine = engine_with(3, &[(1, 2), (1, 0)]);
        let shared = engine.paths(Player::X).intersections_with(engine.paths(Player::O));
        let weight_of = |coord| shared.iter().find(|i| i.coord == coord).map(|i| i.weight);
        assert_eq!(weight_of(c(0, 0)), Some(5));
        assert_eq!(weight_of(c(0, 2)), Some(5));
        assert_eq!(engine.decide(Player::X), Decision::Intersect(c(0, 2)));
    }

    #[test]
    fn test_fallback_extends_own_line_when_nothing_is_shared() {
        // X keeps only column 3 and O only column 1
        let engine = engine_with(
            4,
            &[(2, 2), (1, 2), (3, 0), (0, 0), (0, 2), (3, 1), (1, 3), (2, 0)],
        );
        let own = engine.paths(Player::X);
        let theirs = engine.paths(Player::O);
        assert!(!theirs.is_empty());
        assert!(own.intersections_with(theirs).is_empty());

        let next = own.best().and_then(|p| p.next_cell());
        assert_eq!(next, Some(c(0, 3)));
        assert_eq!(engine.decide(Player::X), Decision::Fallback(c(0, 3)));
    }

    #[test]
    fn test_fallback_uses_opponent_line_when_own_set_is_empty() {
        // O X _ / X O _ / X O X: only X's column 2 is left
        let engine = engine_with(
            3,
            &[(2, 0), (2, 1), (1, 0), (1, 1), (0, 1), (0, 0), (2, 2)],
        );
        assert!(engine.paths(Player::O).is_empty());
        let next = engine.paths(Player::X).best().and_then(|p| p.next_cell());
        assert_eq!(next, Some(c(0, 2)));
        assert_eq!(engine.decide(Player::O), Decision::Fallback(c(0, 2)));
    }

    #[test]
    fn test_draw_when_no_lines_left() {
        // X O X / X O O / O X _ with one cell left
        let engine = engine_with(
            3,
            &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0)],
        );
        assert!(engine.paths(Player::X).is_empty());
        assert!(engine.paths(Player::O).is_empty());
        assert!(engine.is_draw());
        assert_eq!(engine.decide(Player::X), Decision::Draw);
        assert_eq!(engine.suggest_move(Player::X), None);
    }

    #[test]
    fn test_decision_display() {
        assert_eq!(Decision::Block(c(0, 2)).to_string(), "Block (0,2)");
        assert_eq!(Decision::Draw.to_string(), "Draw");
    }
}
