//! Maze settings and their validation

use anyhow::ensure;

use crate::grid::Cell;
use crate::render::Layout;

/// Everything needed to generate and draw one maze
#[derive(Clone, Debug)]
pub struct MazeConfig {
    pub rows: usize,
    pub cols: usize,
    /// Cell where the walk begins
    pub start: Cell,
    /// Random seed; `None` draws one from OS entropy
    pub seed: Option<u64>,
    pub layout: Layout,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            start: Cell::new(0, 0),
            seed: None,
            layout: Layout::default(),
        }
    }
}

impl MazeConfig {
    /// Check that the settings describe a drawable maze
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.rows > 0 && self.cols > 0,
            "grid size must be positive, got {}x{}",
            self.rows,
            self.cols
        );
        ensure!(
            self.rows.max(self.cols) <= Layout::MAX_CANVAS_SIDE as usize,
            "grid of {}x{} cells is too large, at most {} per side",
            self.rows,
            self.cols,
            Layout::MAX_CANVAS_SIDE
        );
        ensure!(
            self.start.row < self.rows && self.start.col < self.cols,
            "start cell {} is outside of the {}x{} grid",
            self.start,
            self.rows,
            self.cols
        );

        let layout = &self.layout;
        ensure!(
            layout.cell_size > 0.0,
            "cell size must be positive, got {}",
            layout.cell_size
        );
        ensure!(
            layout.padding >= 0.0,
            "padding must not be negative, got {}",
            layout.padding
        );
        ensure!(
            layout.wall_width > 0.0 && layout.erase_width > 0.0,
            "line widths must be positive, got wall {} and erase {}",
            layout.wall_width,
            layout.erase_width
        );
        ensure!(
            layout.erase_margin >= 0.0 && layout.erase_margin < layout.cell_size / 2.0,
            "erase margin must be in [0, {}), got {}",
            layout.cell_size / 2.0,
            layout.erase_margin
        );
        layout.canvas_size(self.rows, self.cols)?;
        Ok(())
    }
}
