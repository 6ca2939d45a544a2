//! Maze: The grid, its tiles, and the movement rules on it.

mod grid;
mod movement;

pub use grid::{Grid, Maze, Position, Tile};
pub use movement::{resolve, Direction};
