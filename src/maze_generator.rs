//! Maze generation

use anyhow::ensure;
use log::trace;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::grid::{Cell, Direction, Grid};

/// Passage carved between two adjacent cells
///
/// `previous` is the cell the walk came from, `current` the newly visited
/// cell.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct WallRemoval {
    pub current: Cell,
    pub previous: Cell,
}

/// Randomized recursive backtracker
pub struct MazeGenerator<R = StdRng> {
    random: R,
}

impl MazeGenerator<StdRng> {
    /// Create generator, seeded from `seed` or from OS entropy
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }
}

impl<R: Rng> MazeGenerator<R> {
    pub fn from_rng(random: R) -> Self {
        Self { random }
    }

    /// Generate a perfect maze on a fresh `rows` x `cols` grid
    ///
    /// Returns the carved passages in the order they were made.
    pub fn generate(
        &mut self,
        rows: usize,
        cols: usize,
        start: Cell,
    ) -> anyhow::Result<Vec<WallRemoval>> {
        let mut grid = Grid::with_shape(rows, cols);
        let mut removals = Vec::with_capacity((rows * cols).saturating_sub(1));
        self.carve(&mut grid, start, |removal| removals.push(removal))?;
        Ok(removals)
    }

    /// Carve passages through `grid`, starting from `start`
    ///
    /// Performs a depth-first walk: from the cell on top of the stack, pick a
    /// random unvisited neighbour, open the wall to it and continue from
    /// there. A cell with no unvisited neighbours is popped, resuming the
    /// search at the cell it was entered from. `on_removal` is called as soon
    /// as each passage is carved.
    ///
    /// The walk is kept on an explicit stack, so the emitted order is the
    /// same as a recursive walk without depending on call-stack depth.
    pub fn carve<F>(
        &mut self,
        grid: &mut Grid,
        start: Cell,
        mut on_removal: F,
    ) -> anyhow::Result<()>
    where
        F: FnMut(WallRemoval),
    {
        ensure!(
            grid.contains(start),
            "start cell {} is outside of the {}x{} grid",
            start,
            grid.rows(),
            grid.cols()
        );

        grid.mark_visited(start);
        let mut stack = vec![start];

        while let Some(&cell) = stack.last() {
            let available = grid.available_directions(cell);
            if available.is_empty() {
                stack.pop();
                continue;
            }

            let direction = self.pick_direction(&available);
            let next = grid
                .neighbor(cell, direction)
                .expect("available direction leads to an in-grid cell");

            let removal = WallRemoval {
                current: next,
                previous: cell,
            };
            trace!("remove wall {} -> {}", removal.previous, removal.current);
            on_removal(removal);

            grid.mark_visited(next);
            stack.push(next);
        }
        Ok(())
    }

    /// Draw directions uniformly from all four until an available one comes up
    ///
    /// `available` must not be empty.
    fn pick_direction(&mut self, available: &[Direction]) -> Direction {
        loop {
            let direction = Direction::ALL[self.random.gen_range(0..4u32) as usize];
            if available.contains(&direction) {
                return direction;
            }
        }
    }
}
