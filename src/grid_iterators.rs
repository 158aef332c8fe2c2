use std::fmt;

use crate::cells::Cartesian2DCoordinate;
use crate::units::{ColumnIndex, RowIndex, SideLength};

/// Row major iteration over every cell coordinate of a square grid.
#[derive(Clone)]
pub struct CellIter {
    side: SideLength,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub fn new(side: SideLength) -> CellIter {
        CellIter {
            side,
            current_cell_number: 0,
            cells_count: side.0 * side.0,
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                    self.side);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

/// Iterates a whole row of coordinates at a time, top row first.
#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    current_row: usize,
    side: SideLength,
}

impl RowIter {
    pub fn new(side: SideLength) -> RowIter {
        RowIter {
            current_row: 0,
            side,
        }
    }
}

impl ExactSizeIterator for RowIter {} // default impl using size_hint()
impl Iterator for RowIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let SideLength(length) = self.side;
        if self.current_row >= length {
            return None;
        }

        let row_index = RowIndex(self.current_row);
        let coords = (0..length)
            .map(|i| Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(i), row_index))
            .collect();
        self.current_row += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.side.0 - self.current_row;
        (remaining, Some(remaining))
    }
}
