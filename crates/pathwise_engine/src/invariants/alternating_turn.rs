//! Alternating turn invariant: X and O take turns, X first.

use super::Invariant;
use crate::{Engine, Player};

/// Invariant: move history alternates X, O, X, ...
pub struct AlternatingTurnInvariant;

impl Invariant<Engine> for AlternatingTurnInvariant {
    fn holds(engine: &Engine) -> bool {
        engine.history().iter().enumerate().all(|(i, mv)| {
            let expected = if i % 2 == 0 { Player::X } else { Player::O };
            mv.player == expected
        })
    }

    fn description() -> &'static str {
        "Players alternate turns, X first"
    }
}
