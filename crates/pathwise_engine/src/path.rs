//! Candidate winning lines.

use super::Coord;
use serde::{Deserialize, Serialize};

/// Orientation of a winning line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Direction {
    /// A full row.
    Row,
    /// A full column.
    Column,
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

/// Generation index of a path.
///
/// Rows come first, then columns, then the main and anti diagonals. Lower
/// ids win ties between paths of equal rank.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct PathId(pub usize);

/// One potential winning line tracked on behalf of a single player.
///
/// `rank` is the number of cells the owner still has to claim. It starts at
/// the board size and only ever decreases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    id: PathId,
    direction: Direction,
    cells: Vec<Coord>,
    claimed: Vec<bool>,
    rank: usize,
}

impl Path {
    fn new(id: usize, direction: Direction, cells: Vec<Coord>) -> Self {
        let rank = cells.len();
        Self {
            id: PathId(id),
            direction,
            claimed: vec![false; rank],
            cells,
            rank,
        }
    }

    /// Generates the 2n+2 lines of a board in id order.
    pub fn all(size: usize) -> Vec<Path> {
        let mut paths = Vec::with_capacity(2 * size + 2);
        for row in 0..size {
            let cells = (0..size).map(|col| Coord::new(row, col)).collect();
            paths.push(Path::new(paths.len(), Direction::Row, cells));
        }
        for col in 0..size {
            let cells = (0..size).map(|row| Coord::new(row, col)).collect();
            paths.push(Path::new(paths.len(), Direction::Column, cells));
        }
        let diagonal = (0..size).map(|i| Coord::new(i, i)).collect();
        paths.push(Path::new(paths.len(), Direction::Diagonal, diagonal));
        let anti = (0..size).map(|i| Coord::new(i, size - 1 - i)).collect();
        paths.push(Path::new(paths.len(), Direction::AntiDiagonal, anti));
        paths
    }

    /// Identity of this line (shared by both players' copies).
    pub fn id(&self) -> PathId {
        self.id
    }

    /// Orientation of this line.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Cells of the line in generation order.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Moves still required by the owner to complete this line.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Checks if the line passes through `coord`.
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    /// Cells the owner has not claimed yet, in generation order.
    pub fn open_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .zip(&self.claimed)
            .filter(|(_, claimed)| !**claimed)
            .map(|(c, _)| *c)
    }

    /// First unclaimed cell, the one this line would be extended with.
    pub fn next_cell(&self) -> Option<Coord> {
        self.open_cells().next()
    }

    /// Records that the owner took `coord`. Returns false if the line does
    /// not pass through it or it was already claimed.
    pub(crate) fn claim(&mut self, coord: Coord) -> bool {
        match self.cells.iter().position(|c| *c == coord) {
            Some(i) if !self.claimed[i] => {
                self.claimed[i] = true;
                self.rank -= 1;
                true
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells = self
            .open_cells()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} {}({}): [{}]", self.direction, self.id, self.rank, cells)
    }
}
