use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::Grid;

/// Step one cell from `position` in `direction` if the grid allows it.
///
/// The move goes ahead only when the destination is on the grid and the current cell has no
/// wall on that side. Anything else, including stepping out through a doorway, leaves the
/// position unchanged.
pub fn try_move(grid: &Grid,
                position: Cartesian2DCoordinate,
                direction: CompassPrimary)
                -> Cartesian2DCoordinate {
    match grid.neighbour_at_direction(position, direction) {
        Some(next) if grid.is_open(position, direction) => next,
        _ => position,
    }
}

#[cfg(test)]
mod tests {

    use quickcheck::quickcheck;

    use super::*;
    use crate::generators::{generate, seeded_rng};
    use crate::units::SideLength;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn moves_through_open_walls_only() {
        let mut g = Grid::new(SideLength(3)).unwrap();
        g.carve(gc(1, 1), gc(2, 1)).unwrap();

        assert_eq!(try_move(&g, gc(1, 1), CompassPrimary::East), gc(2, 1));
        assert_eq!(try_move(&g, gc(2, 1), CompassPrimary::West), gc(1, 1));
        assert_eq!(try_move(&g, gc(1, 1), CompassPrimary::North), gc(1, 1));
        assert_eq!(try_move(&g, gc(1, 1), CompassPrimary::South), gc(1, 1));
        assert_eq!(try_move(&g, gc(1, 1), CompassPrimary::West), gc(1, 1));
    }

    #[test]
    fn doorways_do_not_lead_off_the_grid() {
        let mut rng = seeded_rng(11);
        let g = generate(SideLength(10), &mut rng).unwrap();
        assert_eq!(try_move(&g, g.entrance(), CompassPrimary::West), g.entrance());
        assert_eq!(try_move(&g, g.exit(), CompassPrimary::South), g.exit());

        let mut open = Grid::new(SideLength(1)).unwrap();
        open.open_doorways();
        for dir in CompassPrimary::ALL.iter() {
            assert_eq!(try_move(&open, gc(0, 0), *dir), gc(0, 0));
        }
    }

    #[test]
    fn positions_off_the_grid_stay_put() {
        let g = Grid::new(SideLength(2)).unwrap();
        assert_eq!(try_move(&g, gc(5, 5), CompassPrimary::North), gc(5, 5));
    }

    #[test]
    fn quickcheck_random_walks_stay_legal() {
        fn p(seed: u64, moves: Vec<u8>) -> bool {
            let g = generate(SideLength(10), &mut seeded_rng(seed)).unwrap();
            let mut position = g.entrance();
            for m in moves {
                let dir = CompassPrimary::ALL[(m % 4) as usize];
                let next = try_move(&g, position, dir);
                let in_bounds = g.is_valid_coordinate(next);
                let legal = next == position ||
                            (g.is_open(position, dir) &&
                             g.neighbour_at_direction(position, dir) == Some(next));
                if !in_bounds || !legal {
                    return false;
                }
                position = next;
            }
            true
        }
        quickcheck(p as fn(u64, Vec<u8>) -> bool)
    }
}
