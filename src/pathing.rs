use bit_set::BitSet;
use error_chain::bail;
use log::{debug, warn};
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::errors::*;
use crate::grid::Grid;
use crate::utils;
use crate::utils::FnvHashMap;

/// Find a path from `start` to `end` by depth first search over the open passages.
///
/// The returned path starts with `start`, ends with `end`, and every consecutive pair of
/// coordinates is joined by an open wall. It is the first path the search finds, not
/// necessarily the shortest one. Neighbours are pushed in the order up, right, down, left and
/// popped last in first out, so left is explored first among ties.
///
/// The grid is not modified, visited cells are tracked in a separate bit set.
pub fn solve(grid: &Grid,
             start: Cartesian2DCoordinate,
             end: Cartesian2DCoordinate)
             -> Result<Vec<Cartesian2DCoordinate>> {
    for &coord in &[start, end] {
        if !grid.is_valid_coordinate(coord) {
            bail!(ErrorKind::InvalidCoordinate(coord));
        }
    }

    let mut visited = BitSet::with_capacity(grid.size());
    let mut stack: Vec<(Cartesian2DCoordinate, Vec<Cartesian2DCoordinate>)> =
        vec![(start, vec![start])];

    while let Some((current, path)) = stack.pop() {
        if current == end {
            debug!("solved {} -> {} in {} steps", start, end, path.len());
            return Ok(path);
        }

        let current_index = match grid.grid_coordinate_to_index(current) {
            Some(index) => index,
            None => continue,
        };
        if !visited.insert(current_index) {
            continue;
        }

        for dir in CompassPrimary::ALL.iter() {
            if !grid.is_open(current, *dir) {
                continue;
            }
            if let Some(neighbour) = grid.neighbour_at_direction(current, *dir) {
                let seen = grid.grid_coordinate_to_index(neighbour)
                    .map_or(true, |index| visited.contains(index));
                if !seen {
                    let mut next_path = Vec::with_capacity(path.len() + 1);
                    next_path.extend_from_slice(&path);
                    next_path.push(neighbour);
                    stack.push((neighbour, next_path));
                }
            }
        }
    }

    warn!("no path from {} to {}", start, end);
    bail!(ErrorKind::Unreachable(start, end))
}

/// Flood fill step counts from one start cell to every cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Returns None if `start_coordinate` is not on the grid.
    pub fn new(grid: &Grid, start_coordinate: Cartesian2DCoordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        // Every passage is one step, so the first time a cell is reached is also the shortest.
        // The distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances.get(cell_coord).cloned().unwrap_or(0);
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = grid.links(*cell_coord).unwrap_or_default();
                for link_coordinate in &links {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[Cartesian2DCoordinate; 8]>>();
        furthest.sort();
        furthest
    }
}

/// The shortest path from the distances' start point to `end_point`, walking back downhill
/// through the flood fill numbers. None if the end point is unreachable.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: Cartesian2DCoordinate)
                     -> Option<Vec<Cartesian2DCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let start = distances_from_start.start();
    let mut path = vec![end_point];
    let mut current_coord = end_point;

    while current_coord != start {
        let closer = grid.links(current_coord)?
            .iter()
            .cloned()
            .find(|coord| {
                distances_from_start.distance_from_start_to(*coord)
                    .map_or(false, |d| d + 1 == current_distance)
            });

        match closer {
            Some(closer_coord) => {
                current_coord = closer_coord;
                current_distance -= 1;
                path.push(current_coord);
            }
            // The distances do not belong to this grid.
            None => return None,
        }
    }

    path.reverse();
    Some(path)
}
