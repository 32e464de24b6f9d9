//! Per-player collection of still-winnable lines.
//!
//! A [`PathSet`] holds exactly the lines its owner can still complete,
//! ordered by ascending rank and then by [`PathId`]. Two operations keep it
//! current as the game goes on:
//!
//! - [`PathSet::claim`] when the owner moves: every line through the cell
//!   drops one rank.
//! - [`PathSet::eliminate`] when the opponent moves: every line through the
//!   cell is dropped for good.
//!
//! Because lines are removed the moment the opponent touches them, every
//! open cell of a live line is an empty board cell.

use super::{Coord, Path, PathId, Player};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Outcome of a claim on the owner's own set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// Lines were advanced but none is complete.
    Advanced,
    /// The claim completed a line; the owner has won.
    Completed(PathId),
}

/// A cell that advances the owner's lines and blocks the opponent's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intersection {
    /// The shared cell.
    pub coord: Coord,
    /// `own_rank + other_rank`; lower is more urgent.
    pub weight: usize,
    /// Lowest rank among the owner's lines through the cell.
    pub own_rank: usize,
    /// Lowest rank among the opponent's lines through the cell.
    pub other_rank: usize,
}

/// All lines still winnable by one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSet {
    owner: Player,
    paths: Vec<Path>,
}

impl PathSet {
    /// Creates the full set of 2n+2 lines for `owner`.
    #[instrument]
    pub fn new(owner: Player, size: usize) -> Self {
        Self {
            owner,
            paths: Path::all(size),
        }
    }

    /// Number of live lines.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Checks if no line is winnable any more.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Live lines in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter()
    }

    /// Records that the owner took `coord`.
    #[instrument(skip(self), fields(owner = %self.owner))]
    pub fn claim(&mut self, coord: Coord) -> Claim {
        let mut advanced = 0;
        for path in &mut self.paths {
            if path.claim(coord) {
                advanced += 1;
            }
        }
        self.paths.sort_by_key(|p| (p.rank(), p.id()));
        debug!(advanced, "Claimed cell");

        match self.paths.first() {
            Some(path) if path.rank() == 0 => Claim::Completed(path.id()),
            _ => Claim::Advanced,
        }
    }

    /// Drops every line through `coord` after the opponent took it.
    #[instrument(skip(self), fields(owner = %self.owner))]
    pub fn eliminate(&mut self, coord: Coord) -> usize {
        let before = self.paths.len();
        self.paths.retain(|p| !p.contains(coord));
        let removed = before - self.paths.len();
        debug!(removed, remaining = self.paths.len(), "Eliminated lines");
        removed
    }

    /// Lowest-rank line, earliest generated on ties.
    pub fn best(&self) -> Option<&Path> {
        self.paths.first()
    }

    /// Lines one move from completion.
    pub fn one_move_wins(&self) -> Vec<&Path> {
        self.paths.iter().filter(|p| p.rank() == 1).collect()
    }

    /// Distinct cells that would complete a line, in priority order.
    pub fn winning_cells(&self) -> Vec<Coord> {
        let mut cells = Vec::new();
        for cell in self.one_move_wins().into_iter().filter_map(Path::next_cell) {
            if !cells.contains(&cell) {
                cells.push(cell);
            }
        }
        cells
    }

    /// Open cells of lines at exactly `rank`, deduplicated, in priority order.
    pub fn cells_at_rank(&self, rank: usize) -> Vec<Coord> {
        Self::dedup_cells(self.paths.iter().filter(|p| p.rank() == rank))
    }

    /// Open cells of every live line, deduplicated, in priority order.
    pub fn open_cells(&self) -> Vec<Coord> {
        Self::dedup_cells(self.paths.iter())
    }

    fn dedup_cells<'a>(paths: impl Iterator<Item = &'a Path>) -> Vec<Coord> {
        let mut cells = Vec::new();
        for cell in paths.flat_map(Path::open_cells) {
            if !cells.contains(&cell) {
                cells.push(cell);
            }
        }
        cells
    }

    /// Lowest rank of any live line through each open cell.
    pub fn cell_ranks(&self) -> BTreeMap<Coord, usize> {
        let mut ranks = BTreeMap::new();
        for path in &self.paths {
            for cell in path.open_cells() {
                ranks
                    .entry(cell)
                    .and_modify(|r: &mut usize| *r = (*r).min(path.rank()))
                    .or_insert(path.rank());
            }
        }
        ranks
    }

    /// Cells open in both sets, most urgent first.
    ///
    /// Sorted by combined weight, then by this set's rank, then row-major.
    #[instrument(skip_all, fields(owner = %self.owner))]
    pub fn intersections_with(&self, other: &PathSet) -> Vec<Intersection> {
        let theirs = other.cell_ranks();
        let mut shared: Vec<Intersection> = self
            .cell_ranks()
            .into_iter()
            .filter_map(|(coord, own_rank)| {
                theirs.get(&coord).map(|&other_rank| Intersection {
                    coord,
                    weight: own_rank + other_rank,
                    own_rank,
                    other_rank,
                })
            })
            .collect();
        shared.sort_by_key(|i| (i.weight, i.own_rank, i.coord));
        debug!(count = shared.len(), "Computed intersections");
        shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn test_new_set_is_full() {
        let set = PathSet::new(Player::X, 5);
        assert_eq!(set.len(), 12);
        assert_eq!(set.best().map(Path::id), Some(PathId(0)));
    }

    #[test]
    fn test_claim_reorders_by_rank() {
        let mut set = PathSet::new(Player::X, 3);
        assert_eq!(set.claim(c(2, 2)), Claim::Advanced);

        // Row 2, column 2 and the main diagonal now rank 2, in id order
        let ranked: Vec<_> = set.iter().take(3).map(|p| (p.id(), p.rank())).collect();
        assert_eq!(
            ranked,
            vec![(PathId(2), 2), (PathId(5), 2), (PathId(6), 2)]
        );
    }

    #[test]
    fn test_claim_signals_completion() {
        let mut set = PathSet::new(Player::O, 3);
        set.claim(c(0, 2));
        set.claim(c(1, 1));
        assert_eq!(set.one_move_wins().len(), 1);
        assert_eq!(set.winning_cells(), vec![c(2, 0)]);
        assert_eq!(set.claim(c(2, 0)), Claim::Completed(PathId(7)));
    }

    #[test]
    fn test_eliminate_removes_lines_through_cell() {
        let mut set = PathSet::new(Player::X, 3);
        assert_eq!(set.eliminate(c(1, 1)), 4);
        assert_eq!(set.len(), 4);
        assert!(set.iter().all(|p| !p.contains(c(1, 1))));

        // Ranks of survivors untouched
        assert!(set.iter().all(|p| p.rank() == 3));
    }

    #[test]
    fn test_best_is_none_when_empty() {
        let mut set = PathSet::new(Player::X, 3);
        for cell in [c(0, 0), c(1, 1), c(2, 2), c(0, 1), c(1, 2), c(2, 0)] {
            set.eliminate(cell);
        }
        assert!(set.is_empty());
        assert!(set.best().is_none());
        assert!(set.open_cells().is_empty());
    }

    #[test]
    fn test_intersections_prefer_urgent_cells() {
        let mut mine = PathSet::new(Player::X, 3);
        let mut theirs = PathSet::new(Player::O, 3);
        mine.claim(c(0, 0));
        theirs.eliminate(c(0, 0));
        theirs.claim(c(1, 1));
        mine.eliminate(c(1, 1));

        let shared = mine.intersections_with(&theirs);
        assert!(!shared.is_empty());
        assert!(shared.iter().all(|i| i.weight == i.own_rank + i.other_rank));
        assert!(shared.windows(2).all(|w| w[0].weight <= w[1].weight));

        // Neither occupied cell can be shared
        assert!(shared.iter().all(|i| i.coord != c(0, 0) && i.coord != c(1, 1)));

        // (0,1): X's row 0 at rank 2, O's column 1 at rank 2
        assert_eq!(
            shared[0],
            Intersection {
                coord: c(0, 1),
                weight: 4,
                own_rank: 2,
                other_rank: 2
            }
        );
    }

    #[test]
    fn test_cells_at_rank() {
        let mut set = PathSet::new(Player::X, 3);
        set.claim(c(0, 0));
        set.claim(c(0, 1));
        assert_eq!(set.cells_at_rank(1), vec![c(0, 2)]);
        assert_eq!(set.cells_at_rank(2)[0], c(1, 0));
    }
}
