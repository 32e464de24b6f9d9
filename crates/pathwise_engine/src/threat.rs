//! Forcing-sequence search over path ranks.
//!
//! A threat is a rank-1 line: the opponent must answer it or lose. The
//! search only follows moves that create threats, so every defender reply
//! is forced and the tree stays narrow. It never looks at quiet moves and
//! never mutates the engine it is given.

use super::{Coord, Engine, GameStatus, Move, Player};
use tracing::trace;

/// Plays `player` at `coord` on a copy of the engine.
fn after(engine: &Engine, player: Player, coord: Coord) -> Option<(Engine, GameStatus)> {
    let mut next = engine.clone();
    let status = next.commit(Move::new(player, coord)).ok()?;
    Some((next, status))
}

/// Returns true if `attacker`, who is to move, can win by an unbroken run of
/// threats whatever the defender does.
pub fn forces_win(engine: &Engine, attacker: Player) -> bool {
    let depth = engine.board().empty_cells().count();
    forces_win_within(engine, attacker, depth)
}

fn forces_win_within(engine: &Engine, attacker: Player, depth: usize) -> bool {
    match engine.status() {
        GameStatus::Win(player) => return player == attacker,
        GameStatus::Draw => return false,
        GameStatus::Continue => {}
    }
    if !engine.paths(attacker).winning_cells().is_empty() {
        return true;
    }

    let blocks = engine.paths(attacker.opponent()).winning_cells();
    if blocks.len() >= 2 || depth == 0 {
        return false;
    }
    let moves = match blocks.as_slice() {
        [block] => vec![*block],
        _ => engine.paths(attacker).cells_at_rank(2),
    };

    moves
        .into_iter()
        .any(|coord| forcing_line(engine, attacker, coord, depth))
}

fn forcing_line(engine: &Engine, attacker: Player, coord: Coord, depth: usize) -> bool {
    let Some((next, status)) = after(engine, attacker, coord) else {
        return false;
    };
    match status {
        GameStatus::Win(player) => return player == attacker,
        GameStatus::Draw => return false,
        GameStatus::Continue => {}
    }

    match next.paths(attacker).winning_cells().as_slice() {
        [] => false,
        [reply] => match after(&next, attacker.opponent(), *reply) {
            Some((reply_state, GameStatus::Continue)) => {
                forces_win_within(&reply_state, attacker, depth - 1)
            }
            Some((_, GameStatus::Win(player))) => player == attacker,
            _ => false,
        },
        _ => {
            trace!(%attacker, %coord, "Double threat");
            true
        }
    }
}

/// First cell that leaves `player` with two distinct one-move wins.
pub fn double_threat(engine: &Engine, player: Player) -> Option<Coord> {
    engine
        .paths(player)
        .cells_at_rank(2)
        .into_iter()
        .find(|&coord| match after(engine, player, coord) {
            Some((next, GameStatus::Continue)) => next.paths(player).winning_cells().len() >= 2,
            _ => false,
        })
}

/// Checks that playing `coord` gives the opponent no forcing win.
pub fn is_safe(engine: &Engine, player: Player, coord: Coord) -> bool {
    match after(engine, player, coord) {
        Some((next, GameStatus::Continue)) => !forces_win(&next, player.opponent()),
        Some(_) => true,
        None => false,
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

    #[test]
    fn test_immediate_win_is_forced() {
        let engine = engine_with(3, &[(0, 0), (1, 1), (0, 1)]);
        // O to move, but X is the attacker once O passes
        assert!(forces_win(&engine, Player::X));
        assert!(!forces_win(&engine, Player::O));
    }

    #[test]
    fn test_finds_double_threat() {
        // X: (0,0), (2,2); O: (1,1), (0,2). X forks at (2,0).
        let engine = engine_with(3, &[(0, 0), (1, 1), (2, 2), (0, 2)]);
        // O's (0,2) threatens (2,0) on the anti-diagonal, which X must take anyway
        assert_eq!(engine.paths(Player::O).winning_cells(), vec![Coord::new(2, 0)]);
        assert_eq!(double_threat(&engine, Player::X), Some(Coord::new(2, 0)));
        assert!(forces_win(&engine, Player::X));
    }

    #[test]
    fn test_corner_reply_to_corner_loses() {
        // X (0,0), O (0,2), X (2,0): O must block (1,0), then X forks at (2,2)
        let engine = engine_with(3, &[(0, 0), (0, 2), (2, 0)]);
        assert!(!is_safe(&engine, Player::O, Coord::new(2, 2)));

        let earlier = engine_with(3, &[(0, 0)]);
        assert!(!is_safe(&earlier, Player::O, Coord::new(0, 2)));
        assert!(is_safe(&earlier, Player::O, Coord::new(1, 1)));
    }

    #[test]
    fn test_search_leaves_engine_untouched() {
        let engine = engine_with(4, &[(1, 1), (0, 0), (2, 2)]);
        let before = engine.history().to_vec();
        let _ = forces_win(&engine, Player::X);
        let _ = is_safe(&engine, Player::O, Coord::new(3, 3));
        assert_eq!(engine.history(), before.as_slice());
    }
}
