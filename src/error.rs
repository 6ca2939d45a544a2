//! Error types for loading a game.
//!
//! Everything that can fail before the first tick lives here. Once the
//! engine is running, no operation returns an error: input failures turn
//! into a quit command and render failures are logged by the render thread.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A maze source that cannot be turned into a [`Grid`](crate::maze::Grid).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    /// The source contained no rows.
    #[error("maze is empty")]
    Empty,

    /// A row's length differs from the first row's.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },

    /// A character outside the maze alphabet.
    #[error("unknown tile {ch:?} at row {row}, column {col}")]
    UnknownTile {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
        /// The character found.
        ch: char,
    },

    /// No player start cell.
    #[error("maze has no player start")]
    MissingPlayer,

    /// More than one player start cell.
    #[error("second player start at row {row}, column {col}")]
    DuplicatePlayer {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
    },
}

/// A configuration that parsed but holds unusable values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `tick_ms` was zero.
    #[error("tick_ms must be greater than zero")]
    ZeroTick,

    /// `lives` was zero.
    #[error("lives must be greater than zero")]
    ZeroLives,
}

/// Fatal error raised while loading the maze or configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid configuration")]
    Json(#[from] serde_json::Error),

    /// The configuration has invalid values.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The maze file is malformed.
    #[error(transparent)]
    Maze(#[from] MazeError),
}
