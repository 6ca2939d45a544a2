//! Rules: Player movement, pickups, pursuer movement and collisions.
//!
//! These functions run on the simulation loop's thread and mutate
//! [`GameState`] directly. The only shared state they touch is
//! [`SharedModes`], and only inside [`resolve_collisions`].

use super::modes::{SharedModes, Vulnerability};
use super::state::GameState;
use crate::maze::{resolve, Direction, Position, Tile};
use rand::Rng;

/// Points for eating a dot.
pub const DOT_SCORE: u32 = 1;
/// Points for eating a power pickup.
pub const POWER_SCORE: u32 = 10;

/// Something the player ate this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pickup {
    /// A dot.
    Dot,
    /// A power pickup; the caller must trigger power mode.
    Power,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Every dot was eaten.
    Won,
    /// Lives ran out (or the player quit).
    Lost,
}

/// What happened during one collision pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Where the player was caught by a Normal pursuer, in order.
    pub deaths: Vec<Position>,
    /// Indices of Vulnerable pursuers sent back to spawn.
    pub defeated: Vec<usize>,
}

impl CollisionReport {
    /// Whether the player was caught at least once.
    pub fn player_caught(&self) -> bool {
        !self.deaths.is_empty()
    }
}

/// Move the player one step and eat whatever is there.
pub fn move_player(state: &mut GameState, direction: Direction) -> Option<Pickup> {
    state.player.position = resolve(state.player.position, direction, &state.grid);
    debug_assert!(!state.grid.is_wall(state.player.position));
    consume_pickup(state)
}

/// Eat the pickup under the player, if any.
///
/// An already-cleared cell changes nothing.
pub fn consume_pickup(state: &mut GameState) -> Option<Pickup> {
    match state.grid.take_pickup(state.player.position)? {
        Tile::Dot => {
            state.score += DOT_SCORE;
            state.dots_remaining = state.dots_remaining.saturating_sub(1);
            Some(Pickup::Dot)
        }
        Tile::Power => {
            state.score += POWER_SCORE;
            Some(Pickup::Power)
        }
        Tile::Wall | Tile::Empty => None,
    }
}

/// Move every pursuer one random step.
pub fn move_pursuers<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    for pursuer in &mut state.pursuers {
        pursuer.position = resolve(pursuer.position, Direction::random(rng), &state.grid);
    }
}

/// Resolve every pursuer sharing the player's cell, in pursuer order.
///
/// Holds the pursuer-mode lock for the whole pass so the power timer cannot
/// flip vulnerability halfway through. A Normal pursuer costs a life; if
/// lives remain the player respawns and power mode ends. A Vulnerable
/// pursuer goes back to its spawn and Normal; the player is unaffected.
pub fn resolve_collisions(state: &mut GameState, modes: &SharedModes) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut modes = modes.lock();

    for (index, pursuer) in state.pursuers.iter_mut().enumerate() {
        if pursuer.position != state.player.position {
            continue;
        }

        match modes.get(index) {
            Vulnerability::Normal => {
                if state.lives == 0 {
                    continue;
                }
                report.deaths.push(state.player.position);
                state.lives -= 1;
                if state.lives > 0 {
                    state.player.respawn();
                    modes.reset();
                }
            }
            Vulnerability::Vulnerable => {
                modes.defeat(index);
                pursuer.respawn();
                report.defeated.push(index);
            }
        }
    }

    report
}

/// Check the end conditions. A win takes precedence over a loss.
pub const fn outcome(state: &GameState) -> Option<Outcome> {
    if state.dots_remaining == 0 {
        Some(Outcome::Won)
    } else if state.lives == 0 {
        Some(Outcome::Lost)
    } else {
        None
    }
}
