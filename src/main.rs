use docopt::Docopt;
use itertools::Itertools;
use log::info;
use serde_derive::Deserialize;
use std::{fs, path::PathBuf, time::Duration};

use maze_adventure::{
    cells::Cartesian2DCoordinate,
    difficulty::Difficulty,
    generators,
    grid::Grid,
    grid_displays::{EntranceExitDisplay, LayeredDisplay, PathDisplay},
    grid_traits::GridDisplay,
    pathing,
    renderers,
    units::SideLength,
};

mod play;

const USAGE: &str = "Maze Adventure

Usage:
    maze_driver -h | --help
    maze_driver [play] [--difficulty=<d>] [--grid-size=<n>] [--seed=<s>] [--tick-ms=<ms>] [--snapshot-out=<path>]
    maze_driver render [--difficulty=<d>] [--grid-size=<n>] [--seed=<s>] [--text-out=<path>] [--image-out=<path>] [--cell-pixels=<n>] [--show-path] [--shortest] [--show-distances] [--mark-entrance-exit]
    maze_driver solve [--difficulty=<d>] [--grid-size=<n>] [--seed=<s>] [--shortest]

Options:
    -h --help                Show this screen.
    --difficulty=<d>         easy (10x10), tricky (15x15) or super (20x20) [default: easy].
    --grid-size=<n>          The grid size is n * n, 1 to 64. Takes precedence over the difficulty.
    --seed=<s>               Seed the random source to get the same maze every time.
    --tick-ms=<ms>           Milliseconds between steps of the solution animation [default: 100].
    --snapshot-out=<path>    Where the 'd' key saves a PNG of the maze, maze_without_avatar.png if not given.
    --text-out=<path>        Output file path for a textual rendering of the maze.
    --image-out=<path>       Output file path for an image rendering of the maze. Always PNG format.
    --cell-pixels=<n>        Pixel count to render one cell wall in a maze [default: 10] max 255.
                             Reduced so the image side stays within 4096 pixels.
    --show-path              Show the path from the entrance to the exit.
    --shortest               Use the breadth first shortest path instead of the depth first solve.
    --show-distances         Show the distance from the entrance to every cell.
    --mark-entrance-exit     Mark the entrance and exit cells in an image rendering.

Play keys: arrows move, s solves, n new maze, 1/2/3 difficulty, d snapshot, q quits.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_render: bool,
    cmd_solve: bool,
    flag_difficulty: String,
    flag_grid_size: Option<usize>,
    flag_seed: Option<u64>,
    flag_tick_ms: u64,
    flag_snapshot_out: String,
    flag_text_out: String,
    flag_image_out: String,
    flag_cell_pixels: u8,
    flag_show_path: bool,
    flag_shortest: bool,
    flag_show_distances: bool,
    flag_mark_entrance_exit: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_adventure::errors::Error, ::maze_adventure::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let side = side_length_from_args(&args)?;
    let mut rng = match args.flag_seed {
        Some(seed) => generators::seeded_rng(seed),
        None => generators::entropy_rng(),
    };

    if args.cmd_render {
        let grid = generators::generate(side, &mut rng)?;
        render(&grid, &args)
    } else if args.cmd_solve {
        let grid = generators::generate(side, &mut rng)?;
        let path = find_path(&grid, args.flag_shortest)?;
        println!("{} cells: {}", path.len(), path.iter().join(" -> "));
        Ok(())
    } else {
        let settings = play::PlaySettings {
            side,
            tick: Duration::from_millis(args.flag_tick_ms),
            snapshot_path: if args.flag_snapshot_out.is_empty() {
                PathBuf::from(renderers::DEFAULT_SNAPSHOT_FILE)
            } else {
                PathBuf::from(&args.flag_snapshot_out)
            },
        };
        play::play(&settings, &mut rng)
    }
}

fn side_length_from_args(args: &MazeArgs) -> Result<SideLength> {
    if let Some(n) = args.flag_grid_size {
        return Ok(SideLength(n));
    }
    let difficulty = args.flag_difficulty.parse::<Difficulty>()?;
    info!("difficulty {}", difficulty);
    Ok(difficulty.side_length())
}

fn find_path(grid: &Grid, shortest: bool) -> Result<Vec<Cartesian2DCoordinate>> {
    if shortest {
        pathing::Distances::new(grid, grid.entrance())
            .and_then(|distances| pathing::shortest_path(grid, &distances, grid.exit()))
            .ok_or_else(|| Error::from("no shortest path from the entrance to the exit"))
    } else {
        let path = pathing::solve(grid, grid.entrance(), grid.exit())
            .chain_err(|| "failed to solve the maze")?;
        Ok(path)
    }
}

/// Text goes to stdout unless written to a file, and is the default when no image is asked for.
fn render(grid: &Grid, args: &MazeArgs) -> Result<()> {
    let path = if args.flag_show_path {
        Some(find_path(grid, args.flag_shortest)?)
    } else {
        None
    };
    let distances = if args.flag_show_distances {
        Some(pathing::Distances::new(grid, grid.entrance())
            .ok_or("the entrance is not on the grid")?)
    } else {
        None
    };

    let do_image_render = !args.flag_image_out.is_empty();
    let do_text_render = !do_image_render || !args.flag_text_out.is_empty();

    if do_text_render {
        let markers = EntranceExitDisplay::new(grid);
        let path_display = path.as_ref().map(|p| PathDisplay::new(p));

        let mut layers: Vec<&dyn GridDisplay> = vec![&markers];
        if let Some(ref p) = path_display {
            layers.push(p);
        }
        if let Some(ref d) = distances {
            layers.push(d);
        }
        let display = LayeredDisplay::new(layers);
        let text = grid.view(&display).to_string();

        if args.flag_text_out.is_empty() {
            println!("{}", text);
        } else {
            fs::write(&args.flag_text_out, text)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        }
    }

    if do_image_render {
        let render_options = renderers::RenderOptionsBuilder::new()
            .colour_distances(distances.is_some())
            .distances(distances.as_ref())
            .mark_entrance_exit(args.flag_mark_entrance_exit)
            .show_path(path.is_some())
            .path(path.as_deref())
            .cell_side_pixels_length(args.flag_cell_pixels)
            .build();
        renderers::save_snapshot(grid, &render_options, &args.flag_image_out)
            .chain_err(|| format!("Failed to save maze image {}", args.flag_image_out))?;
    }

    Ok(())
}
