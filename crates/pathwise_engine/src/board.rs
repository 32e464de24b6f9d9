//! Square board of arbitrary size.

use super::{Cell, Coord, InvalidSize, MIN_SIZE, MoveError, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// n-by-n tic-tac-toe board.
///
/// A cell goes from empty to occupied exactly once and never reverts;
/// [`Board::place`] is the only mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board, rejecting sizes below three.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, InvalidSize> {
        if size < MIN_SIZE {
            return Err(InvalidSize { size });
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the coordinate lies on the board.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.contains(coord).then(|| coord.row * self.size + coord.col)
    }

    /// Gets the cell at the given coordinate, or `None` if off the board.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// Checks if a cell is on the board and empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(Cell::Empty))
    }

    /// Marks an empty cell as owned by `player`.
    #[instrument(skip(self))]
    pub fn place(&mut self, coord: Coord, player: Player) -> Result<(), MoveError> {
        let index = self.index(coord).ok_or(MoveError::OutOfBounds(coord))?;
        if self.cells[index] != Cell::Empty {
            return Err(MoveError::OccupiedCell(coord));
        }
        self.cells[index] = Cell::Occupied(player);
        Ok(())
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Empty coordinates in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords().filter(|c| self.is_empty(*c))
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Coord::new(row, col)))
    }

    /// Copies the cells out as a grid of rows.
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.size).map(<[Cell]>::to_vec).collect()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = (0..self.size)
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("   ");
        writeln!(f, "    {} ", header)?;

        let rule = vec!["---"; self.size].join("+");
        for (row, cells) in self.cells.chunks(self.size).enumerate() {
            if row > 0 {
                writeln!(f, "   {}", rule)?;
            }
            let line = cells
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" | ");
            writeln!(f, " {}  {} ", row, line)?;
        }
        Ok(())
    }
}
