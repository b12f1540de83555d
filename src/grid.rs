//! Grid of maze cells and their visited flags

use std::fmt;

use itertools::iproduct;

/// Location of a cell in the grid
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True if `other` is a direct up/right/down/left neighbour
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction of travel from one cell to its neighbour
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions, in the order used for random draws
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Row and column offset of a single step
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// Visited flags of a `rows` x `cols` grid of cells
///
/// Coordinates passed to [Grid::mark_visited] and [Grid::is_visited] must be
/// inside the grid; these are internal invariants of the generator and
/// out-of-range access panics.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    visited: Vec<bool>,
}

impl Grid {
    /// Square grid with `size` cells per side, all unvisited
    pub fn new(size: usize) -> Self {
        Self::with_shape(size, size)
    }

    /// Rectangular grid, all unvisited
    pub fn with_shape(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            visited: vec![false; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    fn index(&self, cell: Cell) -> usize {
        assert!(self.contains(cell), "cell {} outside of grid", cell);
        cell.row * self.cols + cell.col
    }

    pub fn mark_visited(&mut self, cell: Cell) {
        let idx = self.index(cell);
        self.visited[idx] = true;
    }

    pub fn is_visited(&self, cell: Cell) -> bool {
        self.visited[self.index(cell)]
    }

    /// Number of cells visited so far
    pub fn visited_count(&self) -> usize {
        self.cells().filter(|c| self.is_visited(*c)).count()
    }

    /// All cells, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        iproduct!(0..self.rows, 0..self.cols).map(|(row, col)| Cell::new(row, col))
    }

    /// Neighbour of `cell` in `direction`, or `None` if it would be off-grid
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        let (dr, dc) = direction.delta();
        let row = cell.row.checked_add_signed(dr)?;
        let col = cell.col.checked_add_signed(dc)?;
        let next = Cell::new(row, col);
        self.contains(next).then_some(next)
    }

    /// Directions leading to an existing, unvisited neighbour
    ///
    /// Off-grid directions are left out. The result keeps the order of
    /// [Direction::ALL].
    pub fn available_directions(&self, cell: Cell) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| {
                self.neighbor(cell, *d)
                    .is_some_and(|next| !self.is_visited(next))
            })
            .collect()
    }
}
