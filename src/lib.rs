//! # Mazechase
//!
//! A real-time terminal maze-chase game.
//!
//! The player walks a maze eating dots while pursuers wander at random.
//! Eating a power pickup makes every pursuer vulnerable for a while.
//!
//! ## Core Concepts
//!
//! - **Fixed tick**: one simulation step every 200ms by default
//! - **Actor model**: isolated threads for input, rendering and the power timer
//! - **One shared region**: pursuer vulnerability and the power deadline sit
//!   behind a single mutex; everything else belongs to the simulation loop
//!
//! ## Example
//!
//! ```rust,ignore
//! use mazechase::{Engine, EngineConfig, Frame, Maze};
//!
//! let maze: Maze = "#####\n#P.G#\n#####".parse()?;
//! let (_tx, rx) = crossbeam_channel::bounded(16);
//! let engine = Engine::new(EngineConfig::default(), maze, rx, Vec::<Frame>::new())?;
//! let outcome = engine.run();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod config;
pub mod error;
pub mod game;
pub mod maze;
pub mod terminal;

// Re-exports for convenience
pub use actor::{Command, Engine, EngineConfig, Frame, FrameSink, InputActor, PowerTimer, RendererActor};
pub use config::{Config, DisplayMode, Glyphs};
pub use error::{ConfigError, LoadError, MazeError};
pub use game::{GameState, Outcome, Vulnerability};
pub use maze::{resolve, Direction, Grid, Maze, Position, Tile};
