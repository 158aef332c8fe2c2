use smallvec::SmallVec;
use std::fmt;

use crate::units::{ColumnIndex, RowIndex, SideLength};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;
pub type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, side: SideLength) -> Cartesian2DCoordinate {
        let SideLength(width) = side;
        let x = index % width;
        let y = index / width;
        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }
}

impl fmt::Display for Cartesian2DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four ways out of a square cell. North is "up" (towards row 0) and West is "left".
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

impl CompassPrimary {
    /// Every direction in the fixed neighbour check order: top, right, bottom, left.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// The direction of travel from `from` to the adjacent `to`, if they are adjacent.
    pub fn between(from: Cartesian2DCoordinate,
                   to: Cartesian2DCoordinate)
                   -> Option<CompassPrimary> {
        let dx = i64::from(to.x) - i64::from(from.x);
        let dy = i64::from(to.y) - i64::from(from.y);
        match (dx, dy) {
            (0, -1) => Some(CompassPrimary::North),
            (1, 0) => Some(CompassPrimary::East),
            (0, 1) => Some(CompassPrimary::South),
            (-1, 0) => Some(CompassPrimary::West),
            _ => None,
        }
    }

    #[inline]
    fn wall_bit(self) -> u8 {
        match self {
            CompassPrimary::North => 0b0001,
            CompassPrimary::East => 0b0010,
            CompassPrimary::South => 0b0100,
            CompassPrimary::West => 0b1000,
        }
    }
}

/// Creates a new coordinate offset 1 cell away in the given direction.
/// Returns None if the coordinate would fall outside a grid with the given side length.
pub fn offset_coordinate(coord: Cartesian2DCoordinate,
                         dir: CompassPrimary,
                         side: SideLength)
                         -> Option<Cartesian2DCoordinate> {
    let (x, y) = (coord.x as usize, coord.y as usize);
    let SideLength(n) = side;
    if x >= n || y >= n {
        return None;
    }

    match dir {
        CompassPrimary::North => {
            if y > 0 {
                Some(Cartesian2DCoordinate::new(coord.x, coord.y - 1))
            } else {
                None
            }
        }
        CompassPrimary::South => {
            if y + 1 < n {
                Some(Cartesian2DCoordinate::new(coord.x, coord.y + 1))
            } else {
                None
            }
        }
        CompassPrimary::East => {
            if x + 1 < n {
                Some(Cartesian2DCoordinate::new(coord.x + 1, coord.y))
            } else {
                None
            }
        }
        CompassPrimary::West => {
            if x > 0 {
                Some(Cartesian2DCoordinate::new(coord.x - 1, coord.y))
            } else {
                None
            }
        }
    }
}

/// Wall flags of a single cell packed into the low nibble of a byte.
/// A set bit means the wall is present: bit 0 North, bit 1 East, bit 2 South, bit 3 West.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Walls(u8);

impl Walls {
    pub fn all() -> Walls {
        Walls(0b1111)
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn has_wall(self, dir: CompassPrimary) -> bool {
        self.0 & dir.wall_bit() != 0
    }

    #[inline]
    pub fn is_open(self, dir: CompassPrimary) -> bool {
        !self.has_wall(dir)
    }

    pub fn open(&mut self, dir: CompassPrimary) {
        self.0 &= !dir.wall_bit();
    }

    /// Directions with no wall, in the fixed check order.
    pub fn open_directions(self) -> DirectionSmallVec {
        CompassPrimary::ALL.iter()
            .cloned()
            .filter(|dir| self.is_open(*dir))
            .collect()
    }
}

impl Default for Walls {
    fn default() -> Walls {
        Walls::all()
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MazeCell {
    pub coordinate: Cartesian2DCoordinate,
    pub walls: Walls,
    pub is_entrance: bool,
    pub is_exit: bool,
}

impl MazeCell {
    pub fn new(coordinate: Cartesian2DCoordinate) -> MazeCell {
        MazeCell {
            coordinate,
            walls: Walls::all(),
            is_entrance: false,
            is_exit: false,
        }
    }
}
