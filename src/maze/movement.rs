//! Movement resolution shared by the player and every pursuer.

use super::grid::{Grid, Position};
use rand::Rng;

/// One of the four unit steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// All directions, in a fixed order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Pick a direction uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Apply one step of `direction` to `position`.
///
/// The step is clamped to the grid edge (no wraparound). If the destination
/// is a wall the step is rejected and `position` is returned unchanged.
pub fn resolve(position: Position, direction: Direction, grid: &Grid) -> Position {
    let Position { row, col } = position;
    let target = match direction {
        Direction::Up => Position::new(row.saturating_sub(1), col),
        Direction::Down => Position::new((row + 1).min(grid.rows() - 1), col),
        Direction::Left => Position::new(row, col.saturating_sub(1)),
        Direction::Right => Position::new(row, (col + 1).min(grid.cols() - 1)),
    };

    if grid.is_wall(target) {
        position
    } else {
        target
    }
}
