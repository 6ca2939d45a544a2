//! Game: Entity state and the rules applied to it each tick.

mod modes;
pub mod rules;
mod state;

pub use modes::{PowerPhase, PursuerModes, SharedModes, Vulnerability};
pub use rules::{CollisionReport, Outcome, Pickup};
pub use state::{GameState, Player, Pursuer};
