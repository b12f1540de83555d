//! Generate a random perfect maze and draw it as an image
//!
//! Passages are carved with a randomized recursive backtracker: a
//! depth-first walk that opens the wall to a random unvisited neighbour and
//! backs up when none is left. The carved passages form a spanning tree over
//! the cells, so there is exactly one path between any two cells.
//!
//! Drawing is interleaved with generation. The renderer first draws a fully
//! walled grid, then paints over each wall as soon as the generator removes
//! it.
//!
//! # Examples
//! ```
//! use recursive_maze::{config::MazeConfig, render_maze};
//!
//! let config = MazeConfig {
//!     rows: 8,
//!     cols: 8,
//!     seed: Some(1),
//!     ..MazeConfig::default()
//! };
//! let (surface, removals) = render_maze(&config).unwrap();
//! assert_eq!(removals, 63);
//! assert_eq!(surface.image().dimensions(), (244, 244));
//! ```

use anyhow::Context;
use log::{debug, info};

pub mod config;
pub mod grid;
pub mod maze_generator;
pub mod render;

use config::MazeConfig;
use grid::Grid;
use maze_generator::MazeGenerator;
use render::{ImageSurface, MazeRenderer};

/// Generate a maze as described by `config` and draw it
///
/// Returns the drawn surface and the number of walls removed.
pub fn render_maze(config: &MazeConfig) -> anyhow::Result<(ImageSurface, usize)> {
    config.validate().context("invalid maze configuration")?;

    let (width, height) = config
        .layout
        .canvas_size(config.rows, config.cols)
        .context("failed to create drawing surface")?;
    debug!("canvas {}x{}, seed {:?}", width, height, config.seed);

    let mut renderer = MazeRenderer::new(ImageSurface::new(width, height), config.layout.clone());
    renderer.draw_background();
    renderer.draw_base_grid(config.rows, config.cols);

    info!(
        "generating {}x{} maze from {}",
        config.rows, config.cols, config.start
    );
    let mut grid = Grid::with_shape(config.rows, config.cols);
    let mut generator = MazeGenerator::new(config.seed);
    let mut removals = 0;
    generator.carve(&mut grid, config.start, |removal| {
        renderer.on_wall_removed(&removal);
        removals += 1;
    })?;
    info!(
        "removed {} walls, visited {} cells",
        removals,
        grid.visited_count()
    );

    Ok((renderer.into_surface(), removals))
}
