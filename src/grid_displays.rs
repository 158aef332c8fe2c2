use std::fmt;

use crate::cells::Cartesian2DCoordinate;
use crate::grid::Grid;
use crate::grid_traits::GridDisplay;
use crate::pathing::Distances;
use crate::units::SideLength;
use crate::utils::{self, FnvHashSet};

const BLANK_BODY: &str = "   ";

impl GridDisplay for Distances {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from(BLANK_BODY)
        }
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay { on_path_coordinates }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from(BLANK_BODY)
        }
    }
}

/// Arrows marking the way in and the way out.
#[derive(Debug)]
pub struct EntranceExitDisplay {
    entrance: Cartesian2DCoordinate,
    exit: Cartesian2DCoordinate,
}
impl EntranceExitDisplay {
    pub fn new(grid: &Grid) -> EntranceExitDisplay {
        EntranceExitDisplay {
            entrance: grid.entrance(),
            exit: grid.exit(),
        }
    }
}
impl GridDisplay for EntranceExitDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if coord == self.entrance {
            String::from(" → ")
        } else if coord == self.exit {
            String::from(" ↓ ")
        } else {
            String::from(BLANK_BODY)
        }
    }
}

#[derive(Debug)]
pub struct AvatarDisplay {
    avatar: Cartesian2DCoordinate,
}
impl AvatarDisplay {
    pub fn new(avatar: Cartesian2DCoordinate) -> AvatarDisplay {
        AvatarDisplay { avatar }
    }
}
impl GridDisplay for AvatarDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if coord == self.avatar {
            String::from(" @ ")
        } else {
            String::from(BLANK_BODY)
        }
    }
}

/// Stacks displays, the first one with something to show for a cell wins.
pub struct LayeredDisplay<'a> {
    layers: Vec<&'a dyn GridDisplay>,
}
impl<'a> LayeredDisplay<'a> {
    pub fn new(layers: Vec<&'a dyn GridDisplay>) -> LayeredDisplay<'a> {
        LayeredDisplay { layers }
    }
}
impl<'a> GridDisplay for LayeredDisplay<'a> {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        self.layers
            .iter()
            .map(|layer| layer.render_cell_body(coord))
            .find(|body| body.trim() != "")
            .unwrap_or_else(|| String::from(BLANK_BODY))
    }
}

/// A grid paired with what to draw inside its cells.
pub struct GridView<'a> {
    grid: &'a Grid,
    display: Option<&'a dyn GridDisplay>,
}

impl Grid {
    pub fn view<'a>(&'a self, display: &'a dyn GridDisplay) -> GridView<'a> {
        GridView {
            grid: self,
            display: Some(display),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let view = GridView {
            grid: self,
            display: None,
        };
        write!(f, "{}", view)
    }
}

impl<'a> fmt::Display for GridView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";

        let grid = self.grid;
        let SideLength(n) = grid.side_length();

        // Grid lines run from 0 to n in both directions. Each line of text is either a line of
        // corners and horizontal walls, or a row of cell bodies separated by vertical walls.
        let corner = |column_line: usize, row_line: usize| -> &'static str {
            let up = row_line > 0 && grid.has_vertical_wall(column_line, row_line - 1);
            let down = row_line < n && grid.has_vertical_wall(column_line, row_line);
            let left = column_line > 0 && grid.has_horizontal_wall(column_line - 1, row_line);
            let right = column_line < n && grid.has_horizontal_wall(column_line, row_line);

            match (left, right, up, down) {
                (true, true, true, true) => WALL_LRUD,
                (true, true, true, false) => WALL_LRU,
                (true, true, false, true) => WALL_LRD,
                (true, false, true, true) => WALL_LUD,
                (false, true, true, true) => WALL_RUD,
                (true, true, false, false) => WALL_LR,
                (false, false, true, true) => WALL_UD,
                (false, true, true, false) => WALL_RU,
                (true, false, false, true) => WALL_LD,
                (true, false, true, false) => WALL_LU,
                (false, true, false, true) => WALL_RD,
                (true, false, false, false) => WALL_L,
                (false, true, false, false) => WALL_R,
                (false, false, true, false) => WALL_U,
                (false, false, false, true) => WALL_D,
                (false, false, false, false) => " ",
            }
        };

        let wall_line = |row_line: usize, output: &mut String| {
            for column_line in 0..(n + 1) {
                output.push_str(corner(column_line, row_line));
                if column_line < n {
                    if grid.has_horizontal_wall(column_line, row_line) {
                        output.push_str(WALL_LR_3);
                    } else {
                        output.push_str(BLANK_BODY);
                    }
                }
            }
            output.push('\n');
        };

        let mut output = String::new();
        for (row_line, row) in grid.iter_row().enumerate() {
            wall_line(row_line, &mut output);

            for coord in row {
                if grid.has_vertical_wall(coord.x as usize, row_line) {
                    output.push_str(WALL_UD);
                } else {
                    output.push(' ');
                }
                match self.display {
                    Some(displayer) => output.push_str(&displayer.render_cell_body(coord)),
                    None => output.push_str(BLANK_BODY),
                }
            }
            if grid.has_vertical_wall(n, row_line) {
                output.push_str(WALL_UD);
            } else {
                output.push(' ');
            }
            output.push('\n');
        }
        wall_line(n, &mut output);

        write!(f, "{}", output)
    }
}
