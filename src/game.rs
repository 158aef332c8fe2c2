//! A play session: the current maze, the avatar walking it, and solution animations.
//!
//! Every time the maze is replaced or a new solution is requested the session moves to a new
//! epoch. Animations carry the epoch they were started in and the session refuses to apply a
//! step from an older one, so an animation left running against a replaced maze can never
//! move the avatar.

use log::info;
use rand::Rng;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::errors::*;
use crate::generators;
use crate::grid::Grid;
use crate::movement;
use crate::pathing;
use crate::units::SideLength;

#[derive(Debug)]
pub struct Game {
    grid: Grid,
    avatar: Cartesian2DCoordinate,
    epoch: u64,
}

/// Identifies the session epoch an animation belongs to.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct AnimationToken(u64);

/// Steps the avatar along a solved path, one coordinate per `Game::advance`.
#[derive(Debug, Clone)]
pub struct PathAnimation {
    path: Vec<Cartesian2DCoordinate>,
    next: usize,
    token: AnimationToken,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum AnimationStep {
    Moved(Cartesian2DCoordinate),
    Finished,
    Cancelled,
}

impl PathAnimation {
    pub fn path(&self) -> &[Cartesian2DCoordinate] {
        &self.path
    }

    pub fn token(&self) -> AnimationToken {
        self.token
    }

    pub fn remaining(&self) -> usize {
        self.path.len() - self.next
    }
}

impl Game {
    pub fn new<R: Rng>(side: SideLength, rng: &mut R) -> Result<Game> {
        let grid = generators::generate(side, rng)?;
        let avatar = grid.entrance();
        info!("new {}x{} maze", side.0, side.0);
        Ok(Game {
            grid,
            avatar,
            epoch: 0,
        })
    }

    /// Replace the maze with a fresh one of the same size.
    pub fn new_maze<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        let side = self.grid.side_length();
        self.change_size(side, rng)
    }

    /// Replace the maze with a fresh one of a new size.
    /// On error the current maze, avatar and any running animation are left alone.
    pub fn change_size<R: Rng>(&mut self, side: SideLength, rng: &mut R) -> Result<()> {
        let grid = generators::generate(side, rng)?;
        self.avatar = grid.entrance();
        self.grid = grid;
        self.epoch += 1;
        info!("new {}x{} maze", side.0, side.0);
        Ok(())
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn avatar(&self) -> Cartesian2DCoordinate {
        self.avatar
    }

    pub fn is_won(&self) -> bool {
        self.avatar == self.grid.exit()
    }

    /// Try to step the avatar. Returns true if it moved. Once the maze is won the avatar stays
    /// at the exit until a new maze is generated.
    pub fn move_avatar(&mut self, direction: CompassPrimary) -> bool {
        if self.is_won() {
            return false;
        }
        let next = movement::try_move(&self.grid, self.avatar, direction);
        let moved = next != self.avatar;
        self.avatar = next;
        if self.is_won() {
            info!("maze solved by the player");
        }
        moved
    }

    /// Solve the maze from the entrance to the exit and start animating the solution.
    /// Any animation started earlier is cancelled.
    pub fn solve(&mut self) -> Result<PathAnimation> {
        let path = pathing::solve(&self.grid, self.grid.entrance(), self.grid.exit())?;
        self.epoch += 1;
        Ok(PathAnimation {
            path,
            next: 0,
            token: AnimationToken(self.epoch),
        })
    }

    /// Is an animation with this token still allowed to move the avatar?
    pub fn is_current(&self, token: AnimationToken) -> bool {
        token == AnimationToken(self.epoch)
    }

    /// Apply the next step of an animation.
    /// The first step puts the avatar at the start of the path.
    pub fn advance(&mut self, animation: &mut PathAnimation) -> AnimationStep {
        if !self.is_current(animation.token) {
            return AnimationStep::Cancelled;
        }
        match animation.path.get(animation.next) {
            Some(&coord) => {
                animation.next += 1;
                self.avatar = coord;
                AnimationStep::Moved(coord)
            }
            None => AnimationStep::Finished,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators::seeded_rng;
    use crate::generators::testing::FirstChoiceRng;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn avatar_starts_at_the_entrance() {
        let mut rng = seeded_rng(5);
        let mut game = Game::new(SideLength(10), &mut rng).unwrap();
        assert_eq!(game.avatar(), gc(0, 0));
        assert!(!game.is_won());

        game.new_maze(&mut rng).unwrap();
        assert_eq!(game.avatar(), gc(0, 0));
        assert_eq!(game.grid().side_length(), SideLength(10));

        game.change_size(SideLength(20), &mut rng).unwrap();
        assert_eq!(game.avatar(), gc(0, 0));
        assert_eq!(game.grid().exit(), gc(19, 19));
    }

    #[test]
    fn invalid_size_keeps_the_current_maze() {
        let mut rng = seeded_rng(5);
        let mut game = Game::new(SideLength(10), &mut rng).unwrap();
        let before = game.grid().clone();
        assert!(game.change_size(SideLength(0), &mut rng).is_err());
        assert_eq!(game.grid(), &before);
    }

    #[test]
    fn walking_the_first_choice_maze() {
        let mut game = Game::new(SideLength(10), &mut FirstChoiceRng).unwrap();

        // The top row is one long corridor.
        assert!(!game.move_avatar(CompassPrimary::West));
        assert!(!game.move_avatar(CompassPrimary::South));
        for x in 1..10 {
            assert!(game.move_avatar(CompassPrimary::East));
            assert_eq!(game.avatar(), gc(x, 0));
        }
        for y in 1..10 {
            assert!(game.move_avatar(CompassPrimary::South));
            assert_eq!(game.avatar(), gc(9, y));
        }
        assert!(game.is_won());

        // No moves once won, not even back the way we came.
        assert!(!game.move_avatar(CompassPrimary::North));
        assert_eq!(game.avatar(), gc(9, 9));
    }

    #[test]
    fn animation_walks_the_solution() {
        let mut game = Game::new(SideLength(10), &mut FirstChoiceRng).unwrap();
        game.move_avatar(CompassPrimary::East);

        let mut animation = game.solve().unwrap();
        let path = animation.path().to_vec();
        assert_eq!(path.len(), 19);
        assert_eq!(animation.remaining(), 19);

        assert_eq!(game.advance(&mut animation), AnimationStep::Moved(gc(0, 0)));
        assert_eq!(game.avatar(), gc(0, 0));
        for expected in &path[1..] {
            assert_eq!(game.advance(&mut animation), AnimationStep::Moved(*expected));
        }
        assert_eq!(game.advance(&mut animation), AnimationStep::Finished);
        assert!(game.is_won());
    }

    #[test]
    fn new_maze_cancels_running_animation() {
        let mut rng = seeded_rng(8);
        let mut game = Game::new(SideLength(10), &mut rng).unwrap();
        let mut animation = game.solve().unwrap();
        game.advance(&mut animation);
        game.advance(&mut animation);

        game.new_maze(&mut rng).unwrap();
        assert!(!game.is_current(animation.token()));
        assert_eq!(game.advance(&mut animation), AnimationStep::Cancelled);
        assert_eq!(game.avatar(), gc(0, 0));
    }

    #[test]
    fn new_solve_cancels_previous_animation() {
        let mut game = Game::new(SideLength(10), &mut seeded_rng(9)).unwrap();
        let mut first = game.solve().unwrap();
        let mut second = game.solve().unwrap();
        assert_eq!(game.advance(&mut first), AnimationStep::Cancelled);
        assert_eq!(game.advance(&mut second), AnimationStep::Moved(gc(0, 0)));
    }

    #[test]
    fn single_cell_game_is_won_immediately() {
        let game = Game::new(SideLength(1), &mut seeded_rng(1)).unwrap();
        assert!(game.is_won());
    }
}
