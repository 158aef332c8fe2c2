use image::{Rgb, RgbImage};
use log::info;
use std::path::Path;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::errors::*;
use crate::grid::Grid;
use crate::pathing::Distances;
use crate::units::{Height, SideLength, Width};

/// File name used for snapshots when the caller does not pick one.
pub const DEFAULT_SNAPSHOT_FILE: &str = "maze_without_avatar.png";

const DEFAULT_CELL_PIXELS: u8 = 10;

/// Largest image side `render_image` produces. Bigger cell pixel sizes are scaled down to fit.
pub const MAX_IMAGE_SIDE_PIXELS: u32 = 4096;

const BACKGROUND: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
const WALL: Rgb<u8> = Rgb([0, 0, 0]);
const PATH: Rgb<u8> = Rgb([0xff, 0xa5, 0]);
const ENTRANCE: Rgb<u8> = Rgb([0, 0xc0, 0]);
const EXIT: Rgb<u8> = Rgb([0xd0, 0, 0]);
const AVATAR: Rgb<u8> = Rgb([0, 0, 0xff]);

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    colour_distances: bool,
    mark_entrance_exit: bool,
    show_path: bool,
    distances: Option<&'a Distances>,
    path: Option<&'a [Cartesian2DCoordinate]>,
    avatar: Option<Cartesian2DCoordinate>,
    cell_side_pixels_length: u8,
}

impl<'a> Default for RenderOptions<'a> {
    fn default() -> Self {
        RenderOptions {
            colour_distances: false,
            mark_entrance_exit: false,
            show_path: false,
            distances: None,
            path: None,
            avatar: None,
            cell_side_pixels_length: DEFAULT_CELL_PIXELS,
        }
    }
}

#[derive(Debug, Default)]
pub struct RenderOptionsBuilder<'a> {
    options: RenderOptions<'a>,
}
impl<'a> RenderOptionsBuilder<'a> {
    pub fn new() -> RenderOptionsBuilder<'a> {
        RenderOptionsBuilder { options: RenderOptions::default() }
    }
    pub fn colour_distances(mut self, colour_distances: bool) -> Self {
        self.options.colour_distances = colour_distances;
        self
    }
    pub fn mark_entrance_exit(mut self, mark_entrance_exit: bool) -> Self {
        self.options.mark_entrance_exit = mark_entrance_exit;
        self
    }
    pub fn show_path(mut self, show_path: bool) -> Self {
        self.options.show_path = show_path;
        self
    }
    pub fn distances(mut self, distances: Option<&'a Distances>) -> Self {
        self.options.distances = distances;
        self
    }
    pub fn path(mut self, path: Option<&'a [Cartesian2DCoordinate]>) -> Self {
        self.options.path = path;
        self
    }
    /// Draw the player's avatar. Snapshots leave this unset.
    pub fn avatar(mut self, avatar: Option<Cartesian2DCoordinate>) -> Self {
        self.options.avatar = avatar;
        self
    }
    /// Zero is treated as one pixel.
    pub fn cell_side_pixels_length(mut self, cell_side_pixels_length: u8) -> Self {
        self.options.cell_side_pixels_length = cell_side_pixels_length;
        self
    }
    pub fn build(self) -> RenderOptions<'a> {
        self.options
    }
}

/// Pixel dimensions of the image `render_image` produces for a grid.
pub fn image_dimensions(side: SideLength, options: &RenderOptions) -> (Width, Height) {
    let cell = cell_pixels(side, options);
    let length = side.0 as u32 * cell + 1;
    (Width(length), Height(length))
}

/// Draw the maze walls, plus whatever overlays the options ask for, into a new image.
///
/// Each cell is a square of `cell_side_pixels_length` pixels (see `MAX_IMAGE_SIDE_PIXELS`)
/// with its walls on the square's edges, so neighbouring cells share a wall line. Open walls, including the two doorways,
/// are left as background.
pub fn render_image(grid: &Grid, options: &RenderOptions) -> RgbImage {
    let (Width(w), Height(h)) = image_dimensions(grid.side_length(), options);
    let cell = cell_pixels(grid.side_length(), options);
    let mut img = RgbImage::from_pixel(w, h, BACKGROUND);

    if options.colour_distances {
        if let Some(distances) = options.distances {
            let max = distances.max().max(1) as f32;
            for coord in grid.iter() {
                if let Some(d) = distances.distance_from_start_to(coord) {
                    let intensity = (max - d as f32) / max;
                    let dark = (255.0 * intensity) as u8;
                    let bright = 128 + (127.0 * intensity) as u8;
                    fill_cell(&mut img, coord, cell, 0, Rgb([dark, bright, dark]));
                }
            }
        }
    }

    if options.show_path {
        if let Some(path) = options.path {
            for coord in path.iter().filter(|c| grid.is_valid_coordinate(**c)) {
                fill_cell(&mut img, *coord, cell, cell / 3, PATH);
            }
        }
    }

    if options.mark_entrance_exit {
        fill_cell(&mut img, grid.entrance(), cell, cell / 4, ENTRANCE);
        fill_cell(&mut img, grid.exit(), cell, cell / 4, EXIT);
    }

    if let Some(avatar) = options.avatar.filter(|c| grid.is_valid_coordinate(*c)) {
        fill_cell(&mut img, avatar, cell, cell / 4, AVATAR);
    }

    for coord in grid.iter() {
        let x1 = coord.x * cell;
        let y1 = coord.y * cell;
        let x2 = x1 + cell;
        let y2 = y1 + cell;

        if let Some(walls) = grid.walls(coord) {
            if walls.has_wall(CompassPrimary::North) {
                draw_horizontal_line(&mut img, x1, x2, y1);
            }
            if walls.has_wall(CompassPrimary::South) {
                draw_horizontal_line(&mut img, x1, x2, y2);
            }
            if walls.has_wall(CompassPrimary::West) {
                draw_vertical_line(&mut img, x1, y1, y2);
            }
            if walls.has_wall(CompassPrimary::East) {
                draw_vertical_line(&mut img, x2, y1, y2);
            }
        }
    }

    img
}

/// Render the maze and write it out as a PNG.
pub fn save_snapshot<P: AsRef<Path>>(grid: &Grid, options: &RenderOptions, path: P) -> Result<()> {
    let img = render_image(grid, options);
    img.save(path.as_ref())?;
    info!("saved maze snapshot to {}", path.as_ref().display());
    Ok(())
}

/// At least one pixel, and no more than keeps the image within `MAX_IMAGE_SIDE_PIXELS`.
#[inline]
fn cell_pixels(side: SideLength, options: &RenderOptions) -> u32 {
    let cells = (side.0 as u32).max(1);
    let fitting = (MAX_IMAGE_SIDE_PIXELS - 1) / cells;
    u32::from(options.cell_side_pixels_length).min(fitting).max(1)
}

fn draw_horizontal_line(img: &mut RgbImage, x1: u32, x2: u32, y: u32) {
    for x in x1..=x2 {
        img.put_pixel(x, y, WALL);
    }
}

fn draw_vertical_line(img: &mut RgbImage, x: u32, y1: u32, y2: u32) {
    for y in y1..=y2 {
        img.put_pixel(x, y, WALL);
    }
}

/// Fill the inside of a cell, shrunk by `inset` pixels on every side.
fn fill_cell(img: &mut RgbImage,
             coord: Cartesian2DCoordinate,
             cell: u32,
             inset: u32,
             colour: Rgb<u8>) {
    let x1 = coord.x * cell + 1 + inset;
    let y1 = coord.y * cell + 1 + inset;
    let x2 = (coord.x + 1) * cell;
    let y2 = (coord.y + 1) * cell;
    let x2 = x2.saturating_sub(inset).min(img.width());
    let y2 = y2.saturating_sub(inset).min(img.height());

    for x in x1..x2 {
        for y in y1..y2 {
            img.put_pixel(x, y, colour);
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators::testing::FirstChoiceRng;
    use crate::generators::{generate, seeded_rng};
    use crate::pathing;

    fn count_pixels(img: &RgbImage, colour: Rgb<u8>) -> usize {
        img.pixels().filter(|p| **p == colour).count()
    }

    #[test]
    fn image_size_follows_cell_pixels() {
        let g = generate(SideLength(10), &mut seeded_rng(1)).unwrap();
        let options = RenderOptionsBuilder::new().cell_side_pixels_length(8).build();
        let img = render_image(&g, &options);
        assert_eq!((img.width(), img.height()), (81, 81));

        let zero = RenderOptionsBuilder::new().cell_side_pixels_length(0).build();
        assert_eq!(image_dimensions(SideLength(10), &zero), (Width(11), Height(11)));
    }

    #[test]
    fn large_cell_pixels_are_capped() {
        let options = RenderOptionsBuilder::new().cell_side_pixels_length(255).build();
        let (Width(w), Height(h)) = image_dimensions(SideLength(64), &options);
        assert!(w <= MAX_IMAGE_SIDE_PIXELS && h <= MAX_IMAGE_SIDE_PIXELS);
        assert_eq!(w, 64 * 63 + 1);

        // small grids keep the requested size
        assert_eq!(image_dimensions(SideLength(10), &options), (Width(2551), Height(2551)));

        let g = generate(SideLength(64), &mut seeded_rng(5)).unwrap();
        let img = render_image(&g, &options);
        assert_eq!((img.width(), img.height()), (w, h));
        assert_eq!(*img.get_pixel(100, 0), WALL);
        assert_eq!(*img.get_pixel(w - 1, 10), WALL);
    }

    #[test]
    fn closed_cell_is_boxed_in() {
        let g = Grid::new(SideLength(1)).unwrap();
        let img = render_image(&g, &RenderOptions::default());
        for i in 0..11 {
            assert_eq!(*img.get_pixel(i, 0), WALL);
            assert_eq!(*img.get_pixel(i, 10), WALL);
            assert_eq!(*img.get_pixel(0, i), WALL);
            assert_eq!(*img.get_pixel(10, i), WALL);
        }
        assert_eq!(*img.get_pixel(5, 5), BACKGROUND);
    }

    #[test]
    fn doorways_are_gaps_in_the_outline() {
        let g = generate(SideLength(10), &mut seeded_rng(4)).unwrap();
        let img = render_image(&g, &RenderOptions::default());
        // Middle of the entrance's left edge and the exit's bottom edge.
        assert_eq!(*img.get_pixel(0, 5), BACKGROUND);
        assert_eq!(*img.get_pixel(95, 100), BACKGROUND);
        // Elsewhere the outline is intact.
        assert_eq!(*img.get_pixel(0, 15), WALL);
        assert_eq!(*img.get_pixel(85, 100), WALL);
    }

    #[test]
    fn avatar_only_drawn_when_asked() {
        let g = generate(SideLength(10), &mut FirstChoiceRng).unwrap();
        let path = pathing::solve(&g, g.entrance(), g.exit()).unwrap();

        let snapshot = RenderOptionsBuilder::new()
            .mark_entrance_exit(true)
            .show_path(true)
            .path(Some(path.as_slice()))
            .build();
        let img = render_image(&g, &snapshot);
        assert_eq!(count_pixels(&img, AVATAR), 0);
        assert!(count_pixels(&img, PATH) > 0);
        assert!(count_pixels(&img, ENTRANCE) > 0);
        assert!(count_pixels(&img, EXIT) > 0);

        let live = RenderOptionsBuilder::new()
            .avatar(Some(Cartesian2DCoordinate::new(4, 0)))
            .build();
        let img = render_image(&g, &live);
        assert!(count_pixels(&img, AVATAR) > 0);
        assert_eq!(count_pixels(&img, PATH), 0);
    }

    #[test]
    fn distances_shade_the_cells() {
        let g = generate(SideLength(5), &mut seeded_rng(9)).unwrap();
        let distances = pathing::Distances::new(&g, g.entrance()).unwrap();
        let options = RenderOptionsBuilder::new()
            .colour_distances(true)
            .distances(Some(&distances))
            .build();
        let img = render_image(&g, &options);
        // Start cell brightest, the furthest cell darkest.
        assert_eq!(*img.get_pixel(5, 5), Rgb([255, 255, 255]));
        let far = distances.furthest_points_on_grid()[0];
        assert_eq!(*img.get_pixel(far.x * 10 + 5, far.y * 10 + 5), Rgb([0, 128, 0]));
    }

    #[test]
    fn snapshot_written_as_png() {
        let g = generate(SideLength(3), &mut seeded_rng(2)).unwrap();
        let path = std::env::temp_dir().join(format!("maze_snapshot_test_{}.png", std::process::id()));
        save_snapshot(&g, &RenderOptions::default(), &path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!((reloaded.width(), reloaded.height()), (31, 31));
        assert_eq!(reloaded, render_image(&g, &RenderOptions::default()));
        let _ = std::fs::remove_file(&path);
    }
}
