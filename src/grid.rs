use error_chain::bail;
use petgraph::algo::{connected_components, is_cyclic_undirected};
use petgraph::graph::{NodeIndex, UnGraph};
use std::fmt;

use crate::cells::{offset_coordinate, Cartesian2DCoordinate, CompassPrimary, CoordinateSmallVec,
                   MazeCell, Walls};
use crate::errors::*;
use crate::grid_iterators::{CellIter, RowIter};
use crate::units::{EdgesCount, NodesCount, SideLength};

/// Smallest supported maze: a single cell that is both entrance and exit.
pub const MIN_SIDE_LENGTH: usize = 1;
/// Largest supported maze side.
pub const MAX_SIDE_LENGTH: usize = 64;

/// A square maze: `side * side` cells stored row major, each with its own four wall flags.
///
/// Walls between two cells are always carved in pairs, so the wall one cell presents to its
/// neighbour matches the wall the neighbour presents back. The only walls opened on their own
/// are the two boundary doorways of the entrance and exit.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    side: SideLength,
    cells: Vec<MazeCell>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotAdjacent,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: side: {:?}, links: {:?}, walls: {:?}",
               self.side,
               self.links_count(),
               self.wall_bitmap())
    }
}

impl Grid {
    /// A grid with every wall in place. The entrance and exit corners are tagged but their
    /// doorways stay closed until `open_doorways`.
    pub fn new(side: SideLength) -> Result<Grid> {
        let SideLength(n) = side;
        if n < MIN_SIDE_LENGTH || n > MAX_SIDE_LENGTH {
            bail!(ErrorKind::InvalidSize(n));
        }

        let mut cells: Vec<MazeCell> = CellIter::new(side).map(MazeCell::new).collect();
        cells[0].is_entrance = true;
        cells[n * n - 1].is_exit = true;

        Ok(Grid { side, cells })
    }

    #[inline]
    pub fn side_length(&self) -> SideLength {
        self.side
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Node and edge counts of the spanning tree a perfect maze on this grid has.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let nodes = self.size();
        (NodesCount(nodes), EdgesCount(nodes - 1))
    }

    #[inline]
    pub fn entrance(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(0, 0)
    }

    #[inline]
    pub fn exit(&self) -> Cartesian2DCoordinate {
        let last = (self.side.0 - 1) as u32;
        Cartesian2DCoordinate::new(last, last)
    }

    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<&MazeCell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    pub fn walls(&self, coord: Cartesian2DCoordinate) -> Option<Walls> {
        self.cell(coord).map(|cell| cell.walls)
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.side.0 && (coord.y as usize) < self.side.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.side.0 + coord.x as usize)
        } else {
            None
        }
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        offset_coordinate(coord, direction, self.side)
    }

    /// Cells that are above, right, below or left of a cell (in that order), but not
    /// necessarily reachable through an open wall.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL.iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// Is the wall on the `direction` side of the cell missing?
    /// Boundary doorways count as open. Invalid coordinates are never open.
    #[inline]
    pub fn is_open(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.walls(coord).map_or(false, |walls| walls.is_open(direction))
    }

    /// Is there a neighbour in that direction reachable through an open wall?
    pub fn is_neighbour_linked(&self,
                               coord: Cartesian2DCoordinate,
                               direction: CompassPrimary)
                               -> bool {
        self.neighbour_at_direction(coord, direction).is_some() && self.is_open(coord, direction)
    }

    /// Are two cells in the grid joined by a passage?
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        CompassPrimary::between(a, b)
            .map_or(false, |dir| self.is_valid_coordinate(b) && self.is_open(a, dir))
    }

    /// Cells that are linked to a particular cell by a passage.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> Option<CoordinateSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        Some(CompassPrimary::ALL.iter()
            .filter(|dir| self.is_neighbour_linked(coord, **dir))
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect())
    }

    /// Number of open passages between cells. Boundary doorways are not counted.
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// Remove the shared wall between two adjacent cells, on both cells.
    pub fn carve(&mut self,
                 a: Cartesian2DCoordinate,
                 b: Cartesian2DCoordinate)
                 -> ::std::result::Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        let (a_index, b_index) = match (self.grid_coordinate_to_index(a),
                                        self.grid_coordinate_to_index(b)) {
            (Some(a_index), Some(b_index)) => (a_index, b_index),
            _ => return Err(CellLinkError::InvalidGridCoordinate),
        };
        let direction = CompassPrimary::between(a, b).ok_or(CellLinkError::NotAdjacent)?;

        self.cells[a_index].walls.open(direction);
        self.cells[b_index].walls.open(direction.opposite());
        Ok(())
    }

    /// Open the entrance's left wall and the exit's bottom wall to the outside.
    pub fn open_doorways(&mut self) {
        let last = self.cells.len() - 1;
        self.cells[0].walls.open(CompassPrimary::West);
        self.cells[last].walls.open(CompassPrimary::South);
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.side)
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter::new(self.side)
    }

    /// Every passage between two cells, each reported once.
    pub fn iter_links(&self) -> LinksIter {
        LinksIter {
            grid: self,
            cell_index: 0,
            direction_index: 0,
        }
    }

    /// One nibble of wall flags per cell, row major. See `Walls` for the bit layout.
    pub fn wall_bitmap(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.walls.bits()).collect()
    }

    /// Is there a horizontal wall segment on grid line `line` (0..=side) above column `column`?
    /// Line `side` is the southern boundary.
    pub fn has_horizontal_wall(&self, column: usize, line: usize) -> bool {
        let SideLength(n) = self.side;
        if column >= n || line > n {
            return false;
        }
        if line < n {
            self.cells[line * n + column].walls.has_wall(CompassPrimary::North)
        } else {
            self.cells[(n - 1) * n + column].walls.has_wall(CompassPrimary::South)
        }
    }

    /// Is there a vertical wall segment on grid line `line` (0..=side) beside row `row`?
    /// Line `side` is the eastern boundary.
    pub fn has_vertical_wall(&self, line: usize, row: usize) -> bool {
        let SideLength(n) = self.side;
        if row >= n || line > n {
            return false;
        }
        if line < n {
            self.cells[row * n + line].walls.has_wall(CompassPrimary::West)
        } else {
            self.cells[row * n + n - 1].walls.has_wall(CompassPrimary::East)
        }
    }

    /// The passages of the maze as an undirected graph. Node indices are the row major cell
    /// indices and node weights the cell coordinates.
    pub fn as_graph(&self) -> UnGraph<Cartesian2DCoordinate, ()> {
        let (NodesCount(nodes), EdgesCount(edges)) = self.graph_size();
        let mut graph = UnGraph::with_capacity(nodes, edges);
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (a, b) in self.iter_links() {
            if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_to_index(a),
                                                     self.grid_coordinate_to_index(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }

    /// Spanning tree check: every cell connected and no loops.
    pub fn is_perfect_maze(&self) -> bool {
        let graph = self.as_graph();
        graph.edge_count() == self.size() - 1 && connected_components(&graph) == 1 &&
        !is_cyclic_undirected(&graph)
    }
}

pub struct LinksIter<'a> {
    grid: &'a Grid,
    cell_index: usize,
    direction_index: usize,
}

impl<'a> Iterator for LinksIter<'a> {
    type Item = (Cartesian2DCoordinate, Cartesian2DCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        // Only looking east and south reports each passage once.
        const FORWARD: [CompassPrimary; 2] = [CompassPrimary::East, CompassPrimary::South];

        while self.cell_index < self.grid.size() {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.cell_index,
                                                                    self.grid.side);
            let direction = FORWARD[self.direction_index];
            self.direction_index += 1;
            if self.direction_index == FORWARD.len() {
                self.direction_index = 0;
                self.cell_index += 1;
            }

            if let Some(neighbour) = self.grid.neighbour_at_direction(coord, direction) {
                if self.grid.is_open(coord, direction) {
                    return Some((coord, neighbour));
                }
            }
        }
        None
    }
}

impl<'a> fmt::Debug for LinksIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "LinksIter :: cell_index: {:?}, direction_index: {:?}",
               self.cell_index,
               self.direction_index)
    }
}
