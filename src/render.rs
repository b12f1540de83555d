//! Drawing the maze onto a raster surface

use std::path::Path;

use anyhow::{ensure, Context};
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;
use log::debug;

use crate::grid::Cell;
use crate::maze_generator::WallRemoval;

/// Point on the surface, in pixels
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Shape of line endpoints
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum LineCap {
    /// Line ends exactly at the endpoint
    Butt,
    /// Half-disc of the line width around the endpoint
    Round,
}

/// Line style
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Stroke {
    pub color: Rgba<u8>,
    pub width: f32,
    pub cap: LineCap,
}

/// 2D drawing surface the renderer draws on
pub trait Surface {
    /// Width and height in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Paint the whole surface with `color`
    fn fill(&mut self, color: Rgba<u8>);

    /// Draw a straight line from `from` to `to`
    ///
    /// Segments are horizontal or vertical; the maze never draws anything
    /// else.
    fn stroke_segment(&mut self, from: Point, to: Point, stroke: &Stroke);
}

/// In-memory RGBA raster
#[derive(Debug)]
pub struct ImageSurface {
    image: RgbaImage,
}

impl ImageSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Encode as PNG into `path`, replacing any existing file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        self.image
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("failed to write maze image to {}", path.display()))
    }

    /// Pixel range `[first, last)` whose centres lie within `[lo, hi)`
    fn pixel_span(lo: f32, hi: f32, limit: u32) -> Option<(u32, u32)> {
        let first = (lo - 0.5).ceil().max(0.0) as u32;
        let last = ((hi - 0.5).ceil().max(0.0) as u32).min(limit);
        (first < last).then_some((first, last))
    }

    fn fill_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba<u8>) {
        let (width, height) = self.image.dimensions();
        let Some((left, right)) = Self::pixel_span(x0.min(x1), x0.max(x1), width) else {
            return;
        };
        let Some((top, bottom)) = Self::pixel_span(y0.min(y1), y0.max(y1), height) else {
            return;
        };
        let rect = Rect::at(left as i32, top as i32).of_size(right - left, bottom - top);
        draw_filled_rect_mut(&mut self.image, rect, color);
    }

    fn fill_disc(&mut self, center: Point, radius: f32, color: Rgba<u8>) {
        let center = (center.x.round() as i32, center.y.round() as i32);
        draw_filled_circle_mut(&mut self.image, center, radius.round() as i32, color);
    }
}

impl Surface for ImageSurface {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn fill(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    fn stroke_segment(&mut self, from: Point, to: Point, stroke: &Stroke) {
        debug_assert!(from.x == to.x || from.y == to.y, "slanted segment");
        let half = stroke.width / 2.0;
        if from.y == to.y {
            self.fill_rect(from.x, from.y - half, to.x, to.y + half, stroke.color);
        } else {
            self.fill_rect(from.x - half, from.y, to.x + half, to.y, stroke.color);
        }

        if stroke.cap == LineCap::Round {
            self.fill_disc(from, half, stroke.color);
            self.fill_disc(to, half, stroke.color);
        }
    }
}

/// Pixel geometry and colours of the drawn maze
#[derive(Clone, Debug)]
pub struct Layout {
    /// Side of one cell
    pub cell_size: f32,
    /// Empty border around the grid
    pub padding: f32,
    /// Width of grid lines
    pub wall_width: f32,
    /// Width of the line that paints over a removed wall
    pub erase_width: f32,
    /// Distance kept between an erased wall and the perpendicular grid lines
    pub erase_margin: f32,
    pub wall_color: Rgba<u8>,
    pub background: Rgba<u8>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            cell_size: 18.0,
            padding: 50.0,
            wall_width: 3.0,
            erase_width: 4.0,
            erase_margin: 1.5,
            wall_color: Rgba([13, 97, 168, 255]),
            background: Rgba([0, 0, 0, 255]),
        }
    }
}

impl Layout {
    /// Largest canvas side, in pixels
    pub const MAX_CANVAS_SIDE: u32 = 16384;

    /// Canvas width and height needed for a `rows` x `cols` grid
    ///
    /// Fails if either side is not finite or exceeds [Self::MAX_CANVAS_SIDE].
    pub fn canvas_size(&self, rows: usize, cols: usize) -> anyhow::Result<(u32, u32)> {
        let side = |cells: usize| -> anyhow::Result<u32> {
            let px = (2.0 * self.padding as f64 + cells as f64 * self.cell_size as f64).ceil();
            ensure!(
                px.is_finite() && px <= Self::MAX_CANVAS_SIDE as f64,
                "canvas side of {} px exceeds the limit of {} px",
                px,
                Self::MAX_CANVAS_SIDE
            );
            Ok(px as u32)
        };
        Ok((side(cols)?, side(rows)?))
    }

    fn wall_stroke(&self) -> Stroke {
        Stroke {
            color: self.wall_color,
            width: self.wall_width,
            cap: LineCap::Round,
        }
    }

    fn erase_stroke(&self) -> Stroke {
        Stroke {
            color: self.background,
            width: self.erase_width,
            cap: LineCap::Butt,
        }
    }
}

/// Draws the walled grid and opens passages as they are carved
pub struct MazeRenderer<S> {
    surface: S,
    layout: Layout,
}

impl<S: Surface> MazeRenderer<S> {
    pub fn new(surface: S, layout: Layout) -> Self {
        Self { surface, layout }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Paint the full canvas with the background colour
    pub fn draw_background(&mut self) {
        let (width, height) = self.surface.dimensions();
        debug!("drawing background {}x{}", width, height);
        self.surface.fill(self.layout.background);
    }

    /// Draw `rows + 1` horizontal and `cols + 1` vertical grid lines, walling
    /// in every cell
    pub fn draw_base_grid(&mut self, rows: usize, cols: usize) {
        let Layout {
            cell_size, padding, ..
        } = self.layout;
        let stroke = self.layout.wall_stroke();
        let right = padding + cols as f32 * cell_size;
        let bottom = padding + rows as f32 * cell_size;

        for i in 0..=rows {
            let y = padding + i as f32 * cell_size;
            self.surface
                .stroke_segment(Point::new(padding, y), Point::new(right, y), &stroke);
        }
        for j in 0..=cols {
            let x = padding + j as f32 * cell_size;
            self.surface
                .stroke_segment(Point::new(x, padding), Point::new(x, bottom), &stroke);
        }
    }

    /// Centre of `cell` in pixels
    pub fn cell_center(&self, cell: Cell) -> Point {
        let Layout {
            cell_size, padding, ..
        } = self.layout;
        let axis = |index: usize| padding + (index + 1) as f32 * cell_size - cell_size / 2.0;
        Point::new(axis(cell.col), axis(cell.row))
    }

    /// Wall segment shared by the two cells of `removal`
    ///
    /// The segment lies halfway between the cell centres, perpendicular to
    /// the direction of travel, shortened by the erase margin at both ends.
    /// Endpoints are ordered by increasing coordinate.
    pub fn wall_segment(&self, removal: &WallRemoval) -> (Point, Point) {
        let a = self.cell_center(removal.previous);
        let b = self.cell_center(removal.current);
        let mid = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        let half = self.layout.cell_size / 2.0 - self.layout.erase_margin;

        if removal.previous.col == removal.current.col {
            // Cells above each other: wall is horizontal
            (
                Point::new(mid.x - half, mid.y),
                Point::new(mid.x + half, mid.y),
            )
        } else {
            (
                Point::new(mid.x, mid.y - half),
                Point::new(mid.x, mid.y + half),
            )
        }
    }

    /// Paint over the wall between the two cells of `removal`
    pub fn on_wall_removed(&mut self, removal: &WallRemoval) {
        let (from, to) = self.wall_segment(removal);
        let stroke = self.layout.erase_stroke();
        self.surface.stroke_segment(from, to, &stroke);
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::{ImageSurface, Layout, LineCap, MazeRenderer, Point, Stroke, Surface};
    use crate::grid::Cell;
    use crate::maze_generator::{MazeGenerator, WallRemoval};

    #[derive(Default)]
    struct RecordingSurface {
        fills: Vec<Rgba<u8>>,
        strokes: Vec<(Point, Point, Stroke)>,
    }

    impl Surface for RecordingSurface {
        fn dimensions(&self) -> (u32, u32) {
            (1000, 1000)
        }

        fn fill(&mut self, color: Rgba<u8>) {
            self.fills.push(color);
        }

        fn stroke_segment(&mut self, from: Point, to: Point, stroke: &Stroke) {
            self.strokes.push((from, to, *stroke));
        }
    }

    fn recording_renderer() -> MazeRenderer<RecordingSurface> {
        MazeRenderer::new(RecordingSurface::default(), Layout::default())
    }

    #[test]
    fn reference_canvas_size() {
        assert_eq!(Layout::default().canvas_size(50, 50).unwrap(), (1000, 1000));
        assert_eq!(Layout::default().canvas_size(2, 5).unwrap(), (190, 136));
    }

    #[test]
    fn oversized_canvas_is_rejected() {
        let layout = Layout {
            cell_size: 1e30,
            ..Layout::default()
        };
        assert!(layout.canvas_size(1, 1).is_err());
        assert!(Layout::default().canvas_size(1, 1_000_000).is_err());
        let padded = Layout {
            padding: f32::INFINITY,
            ..Layout::default()
        };
        assert!(padded.canvas_size(1, 1).is_err());
    }

    #[test]
    fn cell_centers() {
        let renderer = recording_renderer();
        assert_eq!(renderer.cell_center(Cell::new(0, 0)), Point::new(59.0, 59.0));
        assert_eq!(renderer.cell_center(Cell::new(1, 0)), Point::new(59.0, 77.0));
        assert_eq!(renderer.cell_center(Cell::new(0, 1)), Point::new(77.0, 59.0));
        assert_eq!(
            renderer.cell_center(Cell::new(49, 49)),
            Point::new(941.0, 941.0)
        );
    }

    #[test]
    fn wall_between_vertical_neighbours_is_horizontal() {
        let renderer = recording_renderer();
        let removal = WallRemoval {
            current: Cell::new(1, 0),
            previous: Cell::new(0, 0),
        };
        assert_eq!(
            renderer.wall_segment(&removal),
            (Point::new(51.5, 68.0), Point::new(66.5, 68.0))
        );

        // Walking upwards opens the same wall
        let upwards = WallRemoval {
            current: Cell::new(0, 0),
            previous: Cell::new(1, 0),
        };
        assert_eq!(
            renderer.wall_segment(&upwards),
            renderer.wall_segment(&removal)
        );
    }

    #[test]
    fn wall_between_horizontal_neighbours_is_vertical() {
        let renderer = recording_renderer();
        let left = WallRemoval {
            current: Cell::new(2, 3),
            previous: Cell::new(2, 4),
        };
        assert_eq!(
            renderer.wall_segment(&left),
            (Point::new(122.0, 87.5), Point::new(122.0, 102.5))
        );
    }

    #[test]
    fn base_grid_lines() {
        let mut renderer = recording_renderer();
        renderer.draw_background();
        renderer.draw_base_grid(3, 3);
        let surface = renderer.into_surface();

        assert_eq!(surface.fills, vec![Rgba([0, 0, 0, 255])]);
        assert_eq!(surface.strokes.len(), 8);
        assert!(surface
            .strokes
            .iter()
            .all(|(_, _, s)| s.cap == LineCap::Round && s.width == 3.0));
        assert_eq!(
            (surface.strokes[0].0, surface.strokes[0].1),
            (Point::new(50.0, 50.0), Point::new(104.0, 50.0))
        );
        assert_eq!(
            (surface.strokes[7].0, surface.strokes[7].1),
            (Point::new(104.0, 50.0), Point::new(104.0, 104.0))
        );
    }

    #[test]
    fn erasing_uses_background_butt_stroke() {
        let mut renderer = recording_renderer();
        renderer.on_wall_removed(&WallRemoval {
            current: Cell::new(0, 1),
            previous: Cell::new(0, 0),
        });
        let (from, to, stroke) = renderer.surface().strokes[0];
        assert_eq!((from, to), (Point::new(68.0, 51.5), Point::new(68.0, 66.5)));
        assert_eq!(
            stroke,
            Stroke {
                color: Rgba([0, 0, 0, 255]),
                width: 4.0,
                cap: LineCap::Butt,
            }
        );
    }

    #[test]
    fn maze_strokes_are_axis_aligned() {
        let mut renderer = recording_renderer();
        renderer.draw_base_grid(5, 4);
        let removals = MazeGenerator::new(Some(8))
            .generate(5, 4, Cell::new(0, 0))
            .unwrap();
        for removal in &removals {
            renderer.on_wall_removed(removal);
        }
        let strokes = &renderer.surface().strokes;
        assert_eq!(strokes.len(), 6 + 5 + removals.len());
        assert!(strokes
            .iter()
            .all(|(from, to, _)| from.x == to.x || from.y == to.y));
    }

    #[test]
    fn image_surface_strokes_axis_aligned_lines() {
        let red = Rgba([255, 0, 0, 255]);
        let mut surface = ImageSurface::new(20, 20);
        surface.stroke_segment(
            Point::new(2.0, 10.0),
            Point::new(18.0, 10.0),
            &Stroke {
                color: red,
                width: 4.0,
                cap: LineCap::Butt,
            },
        );
        assert_eq!(surface.pixel(2, 8), red);
        assert_eq!(surface.pixel(17, 11), red);
        assert_ne!(surface.pixel(1, 10), red);
        assert_ne!(surface.pixel(18, 10), red);
        assert_ne!(surface.pixel(10, 7), red);
        assert_ne!(surface.pixel(10, 12), red);
    }

    #[test]
    fn round_caps_extend_past_endpoints() {
        let blue = Rgba([0, 0, 255, 255]);
        let mut surface = ImageSurface::new(20, 20);
        surface.stroke_segment(
            Point::new(10.0, 4.0),
            Point::new(10.0, 16.0),
            &Stroke {
                color: blue,
                width: 4.0,
                cap: LineCap::Round,
            },
        );
        assert_eq!(surface.pixel(10, 2), blue);
        assert_eq!(surface.pixel(9, 17), blue);
        assert_ne!(surface.pixel(10, 0), blue);
    }

    #[test]
    fn erased_wall_shows_background() {
        let layout = Layout::default();
        let (width, height) = layout.canvas_size(2, 2).unwrap();
        let mut renderer = MazeRenderer::new(ImageSurface::new(width, height), layout.clone());
        renderer.draw_background();
        renderer.draw_base_grid(2, 2);

        assert_eq!(renderer.surface().pixel(59, 68), layout.wall_color);
        assert_eq!(renderer.surface().pixel(10, 10), layout.background);

        renderer.on_wall_removed(&WallRemoval {
            current: Cell::new(1, 0),
            previous: Cell::new(0, 0),
        });
        let surface = renderer.surface();
        assert_eq!(surface.pixel(59, 68), layout.background);
        // Perpendicular grid lines stay intact
        assert_eq!(surface.pixel(50, 68), layout.wall_color);
        assert_eq!(surface.pixel(67, 68), layout.wall_color);
        // Other walls stay intact
        assert_eq!(surface.pixel(68, 59), layout.wall_color);
    }
}
