//! Grid geometry and obstacle layout.
//!
//! Cells are flat indices in `[0, rows * cols)`; `row = id / cols`,
//! `col = id % cols`. The start is always cell 0 and the target the
//! last cell. Obstacles are sampled once at construction and never
//! move afterwards.

use std::collections::HashSet;

use thiserror::Error;

use crate::rng::RandomMoveSource;

/// Flat cell index into the grid.
pub type Cell = usize;

/// The four cardinal moves, each a unit step along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Unit `(Δrow, Δcol)` for this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
        }
    }
}

/// Construction-time misconfiguration. The only fault path in the
/// system; traversal itself has no recoverable errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("{requested} obstacles requested but only {available} cells are free")]
    TooManyObstacles { requested: usize, available: usize },

    #[error("cell {cell} cannot be blocked")]
    InvalidObstacle { cell: Cell },
}

/// Immutable-after-construction grid: dimensions, start, target, and
/// the set of blocked cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    rows: usize,
    cols: usize,
    target: Cell,
    blocked: HashSet<Cell>,
}

impl GridModel {
    /// The agent always starts in the top-left cell.
    pub const START: Cell = 0;

    /// Build a grid with `obstacle_count` blocked cells sampled uniformly
    /// without replacement from every cell except start and target.
    pub fn generate(
        rows: usize,
        cols: usize,
        obstacle_count: usize,
        moves: &mut RandomMoveSource,
    ) -> Result<Self, ConfigurationError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigurationError::InvalidDimensions { rows, cols });
        }
        let target = rows * cols - 1;

        // On a 1x1 grid start and target coincide, so exactly one cell is
        // off-limits rather than two.
        let candidates: Vec<Cell> = (0..rows * cols)
            .filter(|&cell| cell != Self::START && cell != target)
            .collect();
        if obstacle_count > candidates.len() {
            return Err(ConfigurationError::TooManyObstacles {
                requested: obstacle_count,
                available: candidates.len(),
            });
        }

        let blocked = moves.sample_cells(candidates, obstacle_count).into_iter().collect();
        Ok(Self {
            rows,
            cols,
            target,
            blocked,
        })
    }

    /// Build a grid with an explicit obstacle layout. Rejects layouts that
    /// block the start, the target, or cells outside the grid.
    pub fn with_blocked(
        rows: usize,
        cols: usize,
        blocked: HashSet<Cell>,
    ) -> Result<Self, ConfigurationError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigurationError::InvalidDimensions { rows, cols });
        }
        let target = rows * cols - 1;
        for &cell in &blocked {
            if cell == Self::START || cell == target || cell >= rows * cols {
                return Err(ConfigurationError::InvalidObstacle { cell });
            }
        }
        Ok(Self {
            rows,
            cols,
            target,
            blocked,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn start(&self) -> Cell {
        Self::START
    }

    pub fn target(&self) -> Cell {
        self.target
    }

    pub fn blocked(&self) -> &HashSet<Cell> {
        &self.blocked
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.blocked.contains(&cell)
    }

    /// `(row, col)` coordinates of a cell.
    pub fn coords(&self, cell: Cell) -> (usize, usize) {
        (cell / self.cols, cell % self.cols)
    }

    /// The cell reached by moving one step in `direction`.
    ///
    /// A move that would leave the grid returns `cell` unchanged: an
    /// out-of-bounds move collapses to a self-loop, and the engine
    /// filters self-loops out before treating a move as valid.
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Cell {
        let (row, col) = self.coords(cell);
        let (dr, dc) = direction.delta();
        // wrapping_add pushes underflow past the bounds check below.
        let nr = row.wrapping_add(dr as usize);
        let nc = col.wrapping_add(dc as usize);
        if nr < self.rows && nc < self.cols {
            nr * self.cols + nc
        } else {
            cell
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_places_requested_obstacles() {
        let mut moves = RandomMoveSource::new(12345);
        let grid = GridModel::generate(5, 5, 8, &mut moves).unwrap();
        assert_eq!(grid.blocked().len(), 8);
    }

    #[test]
    fn test_start_and_target_never_blocked() {
        // Saturate every grid: all free cells blocked, start/target spared.
        for seed in [1, 42, 999, 123456, 2918957128] {
            let mut moves = RandomMoveSource::new(seed);
            let grid = GridModel::generate(4, 4, 14, &mut moves).unwrap();
            assert!(!grid.is_blocked(grid.start()));
            assert!(!grid.is_blocked(grid.target()));
            assert_eq!(grid.blocked().len(), 14);
        }
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let mut moves = RandomMoveSource::new(1);
        assert_eq!(
            GridModel::generate(0, 5, 0, &mut moves),
            Err(ConfigurationError::InvalidDimensions { rows: 0, cols: 5 })
        );
        assert_eq!(
            GridModel::generate(5, 0, 0, &mut moves),
            Err(ConfigurationError::InvalidDimensions { rows: 5, cols: 0 })
        );
    }

    #[test]
    fn test_too_many_obstacles_rejected() {
        let mut moves = RandomMoveSource::new(1);
        assert_eq!(
            GridModel::generate(2, 2, 3, &mut moves),
            Err(ConfigurationError::TooManyObstacles {
                requested: 3,
                available: 2
            })
        );
    }

    #[test]
    fn test_single_cell_grid_constructible() {
        let mut moves = RandomMoveSource::new(1);
        let grid = GridModel::generate(1, 1, 0, &mut moves).unwrap();
        assert_eq!(grid.start(), grid.target());
        assert!(grid.blocked().is_empty());
    }

    #[test]
    fn test_with_blocked_rejects_start_target_and_out_of_bounds() {
        for cell in [0, 3, 4] {
            let result = GridModel::with_blocked(2, 2, HashSet::from([cell]));
            assert_eq!(result, Err(ConfigurationError::InvalidObstacle { cell }));
        }
    }

    #[test]
    fn test_coords_roundtrip() {
        let grid = GridModel::with_blocked(3, 4, HashSet::new()).unwrap();
        for cell in 0..grid.cell_count() {
            let (row, col) = grid.coords(cell);
            assert!(row < 3 && col < 4);
            assert_eq!(row * 4 + col, cell);
        }
    }

    #[test]
    fn test_neighbor_interior_moves() {
        let grid = GridModel::with_blocked(3, 3, HashSet::new()).unwrap();
        // Centre cell 4 has all four neighbors.
        assert_eq!(grid.neighbor(4, Direction::North), 1);
        assert_eq!(grid.neighbor(4, Direction::South), 7);
        assert_eq!(grid.neighbor(4, Direction::West), 3);
        assert_eq!(grid.neighbor(4, Direction::East), 5);
    }

    #[test]
    fn test_neighbor_clamps_at_edges() {
        let grid = GridModel::with_blocked(3, 3, HashSet::new()).unwrap();
        // Corner 0: north and west leave the grid.
        assert_eq!(grid.neighbor(0, Direction::North), 0);
        assert_eq!(grid.neighbor(0, Direction::West), 0);
        // Corner 8: south and east leave the grid.
        assert_eq!(grid.neighbor(8, Direction::South), 8);
        assert_eq!(grid.neighbor(8, Direction::East), 8);
        // East edge cell 5 must not wrap onto the next row.
        assert_eq!(grid.neighbor(5, Direction::East), 5);
        // West edge cell 3 must not wrap onto the previous row.
        assert_eq!(grid.neighbor(3, Direction::West), 3);
    }

    #[test]
    fn test_generate_deterministic_per_seed() {
        let mut a = RandomMoveSource::new(777);
        let mut b = RandomMoveSource::new(777);
        let grid_a = GridModel::generate(6, 6, 10, &mut a).unwrap();
        let grid_b = GridModel::generate(6, 6, 10, &mut b).unwrap();
        assert_eq!(grid_a.blocked(), grid_b.blocked());
    }
}
