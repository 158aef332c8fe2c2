use bit_set::BitSet;
use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::{Cartesian2DCoordinate, CoordinateSmallVec};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::SideLength;

/// A small fast random source, reproducible from the seed.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}

/// A small fast random source seeded from the operating system.
pub fn entropy_rng() -> XorShiftRng {
    XorShiftRng::from_entropy()
}

/// Build a new perfect maze of `side * side` cells.
///
/// The passages are carved by the recursive backtracker, after which the entrance (top left)
/// gets a doorway on its left and the exit (bottom right) a doorway below it.
/// The same random source state always produces the same maze.
pub fn generate<R: Rng>(side: SideLength, rng: &mut R) -> Result<Grid> {
    let mut grid = Grid::new(side)?;
    recursive_backtracker(&mut grid, rng);
    grid.open_doorways();

    debug!("generated {}x{} maze with {} passages",
           side.0,
           side.0,
           grid.links_count());
    Ok(grid)
}

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// Starting at the entrance it performs a random walk, carving to an unvisited neighbour at
/// each step. On reaching a dead end (no unvisited neighbours) it backtracks along its own
/// trail, via an explicit stack, until it finds a cell that still has an unvisited neighbour.
/// When the stack is empty every cell has been visited exactly once and the passages form a
/// spanning tree: a perfect maze.
///
/// Candidate neighbours are considered in the order up, right, down, left, and one is picked
/// uniformly with `gen_range`, so a random source's draws map onto a reproducible carve.
pub fn recursive_backtracker<R: Rng>(grid: &mut Grid, rng: &mut R) {
    let mut visited = BitSet::with_capacity(grid.size());
    let start = grid.entrance();
    let mut stack = vec![start];
    mark_visited(grid, &mut visited, start);

    while let Some(&current) = stack.last() {
        let unvisited_neighbours = grid.neighbours(current)
            .iter()
            .cloned()
            .filter(|coord| !is_visited(grid, &visited, *coord))
            .collect::<CoordinateSmallVec>();

        if unvisited_neighbours.is_empty() {
            let _ = stack.pop();
        } else {
            let next = unvisited_neighbours[rng.gen_range(0..unvisited_neighbours.len())];
            let carved = grid.carve(current, next);
            debug_assert!(carved.is_ok(), "grid neighbours are always adjacent and valid");
            trace!("carve {} -> {}", current, next);

            mark_visited(grid, &mut visited, next);
            stack.push(next);
        }
    }
}

#[inline]
fn mark_visited(grid: &Grid, visited: &mut BitSet, coord: Cartesian2DCoordinate) {
    if let Some(index) = grid.grid_coordinate_to_index(coord) {
        let _ = visited.insert(index);
    }
}

#[inline]
fn is_visited(grid: &Grid, visited: &BitSet, coord: Cartesian2DCoordinate) -> bool {
    grid.grid_coordinate_to_index(coord)
        .map_or(true, |index| visited.contains(index))
}


#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};

    use super::testing::{FirstChoiceRng, FIRST_CHOICE_10X10_WALLS, KNOWN_SEED, SEEDED_10X10_WALLS};
    use super::*;
    use crate::cells::CompassPrimary;
    use crate::difficulty::Difficulty;
    use crate::pathing;

    fn assert_walls_symmetric(grid: &Grid) {
        for coord in grid.iter() {
            for dir in CompassPrimary::ALL.iter() {
                if let Some(neighbour) = grid.neighbour_at_direction(coord, *dir) {
                    assert_eq!(grid.is_open(coord, *dir),
                               grid.is_open(neighbour, dir.opposite()),
                               "wall mismatch between {} and {}",
                               coord,
                               neighbour);
                }
            }
        }
    }

    #[test]
    fn doorways_always_open() {
        let mut rng = seeded_rng(0x5eed);
        for difficulty in Difficulty::ALL.iter() {
            for _ in 0..1000 {
                let grid = generate(difficulty.side_length(), &mut rng).unwrap();
                assert!(grid.is_open(grid.entrance(), CompassPrimary::West));
                assert!(grid.is_open(grid.exit(), CompassPrimary::South));
            }
        }
    }

    #[test]
    fn supported_sizes_make_perfect_symmetric_mazes() {
        let mut rng = seeded_rng(42);
        for difficulty in Difficulty::ALL.iter() {
            let grid = generate(difficulty.side_length(), &mut rng).unwrap();
            let n = difficulty.side_length().0;
            assert_eq!(grid.links_count(), n * n - 1);
            assert!(grid.is_perfect_maze());
            assert_walls_symmetric(&grid);
        }
    }

    #[test]
    fn quickcheck_spanning_tree() {
        fn p(seed: u64, side: u8) -> TestResult {
            let n = (side % 24) as usize + 1;
            let grid = generate(SideLength(n), &mut seeded_rng(seed)).unwrap();
            TestResult::from_bool(grid.links_count() == n * n - 1 && grid.is_perfect_maze())
        }
        quickcheck(p as fn(u64, u8) -> TestResult)
    }

    #[test]
    fn single_cell_maze() {
        let grid = generate(SideLength(1), &mut seeded_rng(7)).unwrap();
        assert_eq!(grid.links_count(), 0);
        assert_eq!(grid.wall_bitmap(), vec![0b0011]);
        let cell = grid.cell(grid.entrance()).unwrap();
        assert!(cell.is_entrance && cell.is_exit);
    }

    #[test]
    fn invalid_sizes_are_rejected() {
        let mut rng = seeded_rng(1);
        match generate(SideLength(0), &mut rng) {
            Err(Error(ErrorKind::InvalidSize(0), _)) => (),
            other => panic!("expected InvalidSize, got {:?}", other),
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate(SideLength(15), &mut seeded_rng(2024)).unwrap();
        let b = generate(SideLength(15), &mut seeded_rng(2024)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.wall_bitmap(), b.wall_bitmap());
    }

    #[test]
    fn seeded_carve_matches_known_bitmap() {
        let grid = generate(SideLength(10), &mut seeded_rng(KNOWN_SEED)).unwrap();
        assert_eq!(grid.wall_bitmap(), SEEDED_10X10_WALLS.to_vec());
        assert_ne!(grid.wall_bitmap(), FIRST_CHOICE_10X10_WALLS.to_vec());
        assert!(grid.is_perfect_maze());

        let path = pathing::solve(&grid, grid.entrance(), grid.exit()).unwrap();
        assert_eq!(path.first(), Some(&Cartesian2DCoordinate::new(0, 0)));
        assert_eq!(path.last(), Some(&Cartesian2DCoordinate::new(9, 9)));
        assert!(path.len() <= 100);
        assert_eq!(path.len(), 33);
        for pair in path.windows(2) {
            let dir = CompassPrimary::between(pair[0], pair[1]).unwrap();
            assert!(grid.is_open(pair[0], dir));
        }
    }

    #[test]
    fn first_choice_carve_matches_known_bitmap() {
        let grid = generate(SideLength(10), &mut FirstChoiceRng).unwrap();
        assert_eq!(grid.wall_bitmap(), FIRST_CHOICE_10X10_WALLS.to_vec());
        assert!(grid.is_perfect_maze());
    }

    #[test]
    fn carving_leaves_doorways_to_the_generator() {
        let mut grid = Grid::new(SideLength(5)).unwrap();
        recursive_backtracker(&mut grid, &mut seeded_rng(3));
        assert!(!grid.is_open(grid.entrance(), CompassPrimary::West));
        assert!(!grid.is_open(grid.exit(), CompassPrimary::South));
        assert_eq!(grid.links_count(), 24);
    }
}
