//! Game state owned by the simulation loop.

use crate::maze::{Grid, Maze, Position};

/// The player entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    /// Where the player is now.
    pub position: Position,
    /// Where the player returns after being caught.
    pub spawn: Position,
}

impl Player {
    /// A player standing on its spawn.
    pub const fn new(spawn: Position) -> Self {
        Self {
            position: spawn,
            spawn,
        }
    }

    /// Move back to spawn.
    pub const fn respawn(&mut self) {
        self.position = self.spawn;
    }
}

/// A pursuer's position. Its vulnerability lives in
/// [`SharedModes`](crate::game::SharedModes) at the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pursuer {
    /// Where the pursuer is now.
    pub position: Position,
    /// Where the pursuer returns after being defeated.
    pub spawn: Position,
}

impl Pursuer {
    /// A pursuer standing on its spawn.
    pub const fn new(spawn: Position) -> Self {
        Self {
            position: spawn,
            spawn,
        }
    }

    /// Move back to spawn.
    pub const fn respawn(&mut self) {
        self.position = self.spawn;
    }
}

/// Everything the simulation loop owns exclusively.
///
/// Only the loop's thread touches this; no lock is needed.
#[derive(Debug, Clone)]
pub struct GameState {
    /// The maze. Pickups are cleared as they are eaten.
    pub grid: Grid,
    /// The player.
    pub player: Player,
    /// Pursuers, in maze reading order. The set never changes.
    pub pursuers: Vec<Pursuer>,
    /// Points earned so far.
    pub score: u32,
    /// Lives left. Zero means the game is lost.
    pub lives: u32,
    /// Dots not yet eaten. Zero means the game is won.
    pub dots_remaining: usize,
}

impl GameState {
    /// Initial state for a loaded maze.
    pub fn new(maze: Maze, lives: u32) -> Self {
        let dots_remaining = maze.dot_count();
        Self {
            grid: maze.grid,
            player: Player::new(maze.player_spawn),
            pursuers: maze.pursuer_spawns.into_iter().map(Pursuer::new).collect(),
            score: 0,
            lives,
            dots_remaining,
        }
    }
}
