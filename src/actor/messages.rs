//! Message types for actor communication.
//!
//! These types define the protocol between the input thread, the
//! simulation loop and the render thread.

use crate::game::{GameState, Outcome, Vulnerability};
use crate::maze::{Direction, Grid, Position};

/// A classified keystroke from the input thread.
///
/// Exactly one command is published per key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move up.
    Up,
    /// Move down.
    Down,
    /// Move left.
    Left,
    /// Move right.
    Right,
    /// End the game. Also sent when reading input fails.
    Quit,
    /// A key with no binding; the player stays put.
    Noop,
}

impl Command {
    /// The movement this command asks for, if any.
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            Self::Quit | Self::Noop => None,
        }
    }
}

/// A pursuer as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PursuerView {
    /// Current cell.
    pub position: Position,
    /// Current vulnerability.
    pub vulnerability: Vulnerability,
}

/// Immutable snapshot of everything drawn in one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Maze contents.
    pub grid: Grid,
    /// Player cell.
    pub player: Position,
    /// Pursuers in order.
    pub pursuers: Vec<PursuerView>,
    /// Score so far.
    pub score: u32,
    /// Lives left.
    pub lives: u32,
    /// Cell to mark with the death glyph, if the player was just caught.
    pub death: Option<Position>,
    /// Set on the final frame of a game.
    pub outcome: Option<Outcome>,
}

impl Frame {
    /// Snapshot `state` with the given pursuer vulnerabilities.
    ///
    /// `modes` is indexed like `state.pursuers`; missing entries read as
    /// Normal.
    pub fn capture(state: &GameState, modes: &[Vulnerability]) -> Self {
        let pursuers = state
            .pursuers
            .iter()
            .enumerate()
            .map(|(index, pursuer)| PursuerView {
                position: pursuer.position,
                vulnerability: modes.get(index).copied().unwrap_or_default(),
            })
            .collect();

        Self {
            grid: state.grid.clone(),
            player: state.player.position,
            pursuers,
            score: state.score,
            lives: state.lives,
            death: None,
            outcome: None,
        }
    }

    /// Mark a death at `at`.
    #[must_use]
    pub fn with_death(mut self, at: Position) -> Self {
        self.death = Some(at);
        self
    }

    /// Mark this as the final frame.
    #[must_use]
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }
}

/// Commands sent to the render thread.
#[derive(Debug)]
pub enum RenderCommand {
    /// Draw a frame.
    Frame(Box<Frame>),

    /// Shutdown the render thread.
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Maze;

    #[test]
    fn test_command_direction() {
        assert_eq!(Command::Up.direction(), Some(Direction::Up));
        assert_eq!(Command::Right.direction(), Some(Direction::Right));
        assert_eq!(Command::Quit.direction(), None);
        assert_eq!(Command::Noop.direction(), None);
    }

    #[test]
    fn test_capture_frame() {
        let maze: Maze = "P.GG".parse().unwrap();
        let mut state = GameState::new(maze, 2);
        state.score = 7;

        let frame = Frame::capture(&state, &[Vulnerability::Vulnerable]);

        assert_eq!(frame.player, Position::new(0, 0));
        assert_eq!(frame.score, 7);
        assert_eq!(frame.lives, 2);
        assert_eq!(frame.pursuers.len(), 2);
        assert_eq!(frame.pursuers[0].vulnerability, Vulnerability::Vulnerable);
        assert_eq!(frame.pursuers[1].vulnerability, Vulnerability::Normal);
        assert_eq!(frame.death, None);
        assert_eq!(frame.outcome, None);
    }

    #[test]
    fn test_frame_markers() {
        let state = GameState::new("P.".parse().unwrap(), 1);
        let frame = Frame::capture(&state, &[])
            .with_death(Position::new(0, 0))
            .with_outcome(Outcome::Lost);
        assert_eq!(frame.death, Some(Position::new(0, 0)));
        assert_eq!(frame.outcome, Some(Outcome::Lost));
    }
}
