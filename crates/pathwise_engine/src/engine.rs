//! Game engine: one board and a path set per player.

use super::decision::{self, Decision};
use super::invariants::assert_invariants;
use super::{Board, Cell, Claim, Coord, InvalidSize, Move, MoveError, PathSet, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Status reported after each move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    Continue,
    /// The player completed a line.
    Win(Player),
    /// The board filled with no winner.
    Draw,
}

/// Tracks every still-winnable line for both players and picks moves.
///
/// X always moves first. Once a line is completed or the board fills, the
/// engine is terminal and rejects further moves.
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    x_paths: PathSet,
    o_paths: PathSet,
    history: Vec<Move>,
    status: GameStatus,
}

impl Engine {
    /// Creates an engine for an empty `size` by `size` board.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, InvalidSize> {
        let board = Board::new(size)?;
        info!(size, "New game");
        Ok(Self {
            board,
            x_paths: PathSet::new(Player::X, size),
            o_paths: PathSet::new(Player::O, size),
            history: Vec::new(),
            status: GameStatus::Continue,
        })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Copy of the board as rows of cells, for rendering.
    pub fn board_snapshot(&self) -> Vec<Vec<Cell>> {
        self.board.rows()
    }

    /// Lines still winnable by `player`.
    pub fn paths(&self, player: Player) -> &PathSet {
        match player {
            Player::X => &self.x_paths,
            Player::O => &self.o_paths,
        }
    }

    fn paths_mut(&mut self, player: Player) -> &mut PathSet {
        match player {
            Player::X => &mut self.x_paths,
            Player::O => &mut self.o_paths,
        }
    }

    /// Moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The player whose turn it is.
    pub fn to_move(&self) -> Player {
        if self.history.len() % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The winner, once a line has been completed.
    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Win(player) => Some(player),
            _ => None,
        }
    }

    /// True once the board is full without a winner, or once neither
    /// player has a line left to complete.
    pub fn is_draw(&self) -> bool {
        match self.status {
            GameStatus::Draw => true,
            GameStatus::Win(_) => false,
            GameStatus::Continue => self.x_paths.is_empty() && self.o_paths.is_empty(),
        }
    }

    /// Applies a move for `player` at `coord`.
    ///
    /// Bounds and occupancy are checked first, so a taken cell always reports
    /// [`MoveError::OccupiedCell`], even after the game is over.
    #[instrument(skip(self), fields(size = self.size()))]
    pub fn apply_move(
        &mut self,
        coord: Coord,
        player: Player,
    ) -> Result<GameStatus, MoveError> {
        match self.board.get(coord) {
            None => return Err(MoveError::OutOfBounds(coord)),
            Some(Cell::Occupied(_)) => return Err(MoveError::OccupiedCell(coord)),
            Some(Cell::Empty) => {}
        }
        if self.status != GameStatus::Continue {
            return Err(MoveError::GameOver);
        }
        if player != self.to_move() {
            return Err(MoveError::WrongPlayer(player));
        }

        let status = self.commit(Move::new(player, coord))?;
        assert_invariants(self);
        Ok(status)
    }

    /// Places the move and updates both path sets, without turn checks.
    pub(crate) fn commit(&mut self, mv: Move) -> Result<GameStatus, MoveError> {
        self.board.place(mv.coord, mv.player)?;
        self.history.push(mv);

        let claim = self.paths_mut(mv.player).claim(mv.coord);
        self.paths_mut(mv.player.opponent()).eliminate(mv.coord);

        if let Claim::Completed(path) = claim {
            debug!(%mv, %path, "Line completed");
            self.status = GameStatus::Win(mv.player);
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
        }
        Ok(self.status)
    }

    /// Picks a move for `player` and reports why.
    pub fn decide(&self, player: Player) -> Decision {
        decision::decide(self, player)
    }

    /// Suggests a move for `player` without changing any state.
    ///
    /// Returns `None` once the game is over or no line is winnable by either
    /// side. Callers play the suggestion with [`Engine::apply_move`].
    #[instrument(skip(self))]
    pub fn suggest_move(&self, player: Player) -> Option<Coord> {
        let coord = self.decide(player).coord()?;
        assert!(
            self.board.is_empty(coord),
            "path bookkeeping suggested taken cell {coord}"
        );
        Some(coord)
    }
}

#[cfg(test)]
impl Engine {
    /// Writes a cell without touching history or path sets.
    pub(crate) fn corrupt_board(&mut self, coord: Coord, player: Player) {
        self.board.place(coord, player).unwrap();
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board)
    }
}
