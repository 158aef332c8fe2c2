//! **maze_adventure** generates perfect square mazes, solves them and validates an avatar
//! walking through them. The entrance is the top left cell with a doorway on its left and the
//! exit the bottom right cell with a doorway below it.

pub mod cells;
pub mod difficulty;
pub mod errors;
pub mod game;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod grid_traits;
pub mod movement;
pub mod pathing;
pub mod renderers;
pub mod units;
mod utils;
