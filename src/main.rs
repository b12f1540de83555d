//! CLI for maze generation

use std::path::PathBuf;

use clap::Parser;
use log::info;
use recursive_maze::{config::MazeConfig, grid::Cell, render::Layout, render_maze};

/// Draw a random perfect maze into a PNG image
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Cells per side of a square maze
    #[arg(long, default_value_t = 50)]
    size: usize,

    /// Number of rows, overrides `--size`
    #[arg(long)]
    rows: Option<usize>,

    /// Number of columns, overrides `--size`
    #[arg(long)]
    cols: Option<usize>,

    /// Side of one cell in pixels
    #[arg(long, default_value_t = 18.0)]
    cell_size: f32,

    /// Border around the maze in pixels
    #[arg(long, default_value_t = 50.0)]
    padding: f32,

    /// Row of the cell where carving starts
    #[arg(long, default_value_t = 0)]
    start_row: usize,

    /// Column of the cell where carving starts
    #[arg(long, default_value_t = 0)]
    start_col: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the image
    #[arg(default_value = "maze.png")]
    output: PathBuf,
}

impl Args {
    fn to_config(&self) -> MazeConfig {
        let reference = Layout::default();
        // Keep the erased part of a wall at the same proportion of the cell
        let erase_margin = reference.erase_margin * self.cell_size / reference.cell_size;
        MazeConfig {
            rows: self.rows.unwrap_or(self.size),
            cols: self.cols.unwrap_or(self.size),
            start: Cell::new(self.start_row, self.start_col),
            seed: self.seed,
            layout: Layout {
                cell_size: self.cell_size,
                padding: self.padding,
                erase_margin,
                ..reference
            },
        }
    }
}

/// Generate maze, write image
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.to_config();

    let (surface, _) = render_maze(&config)?;
    surface.save(&args.output)?;
    info!("maze written to {}", args.output.display());
    Ok(())
}
