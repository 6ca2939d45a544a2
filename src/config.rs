//! Configuration: display glyphs and game timing, loaded once from JSON.
//!
//! Every field is optional; missing fields take the [`Default`] values.
//!
//! ```json
//! {
//!     "glyphs": { "player": "😋", "pursuer": "👻", "pursuer_vulnerable": "💀" },
//!     "display_mode": "emoji",
//!     "power_duration_secs": 10
//! }
//! ```

use crate::actor::EngineConfig;
use crate::error::{ConfigError, LoadError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// How glyphs are laid out on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// One terminal column per cell; lives shown as a number.
    #[default]
    Ascii,
    /// Two terminal columns per cell; lives shown as player glyphs.
    Emoji,
}

impl DisplayMode {
    /// Terminal columns occupied by one maze cell.
    pub const fn cell_width(self) -> usize {
        match self {
            Self::Ascii => 1,
            Self::Emoji => 2,
        }
    }
}

/// Strings drawn for each kind of cell and entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glyphs {
    /// The player.
    pub player: String,
    /// A pursuer in its normal state.
    pub pursuer: String,
    /// A pursuer during power mode.
    pub pursuer_vulnerable: String,
    /// A wall cell (drawn on a blue background).
    pub wall: String,
    /// A dot.
    pub dot: String,
    /// A power pickup.
    pub power: String,
    /// Drawn where the player was caught.
    pub death: String,
    /// An empty cell.
    pub empty: String,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            player: "P".to_string(),
            pursuer: "G".to_string(),
            pursuer_vulnerable: "g".to_string(),
            wall: " ".to_string(),
            dot: ".".to_string(),
            power: "X".to_string(),
            death: "*".to_string(),
            empty: " ".to_string(),
        }
    }
}

/// Game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display glyphs.
    pub glyphs: Glyphs,
    /// Cell layout mode.
    pub display_mode: DisplayMode,
    /// How long pursuers stay vulnerable after a power pickup.
    pub power_duration_secs: u64,
    /// Simulation tick period in milliseconds.
    pub tick_ms: u64,
    /// Pause after the player is caught, in milliseconds.
    pub death_pause_ms: u64,
    /// Lives at the start of the game.
    pub lives: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            glyphs: Glyphs::default(),
            display_mode: DisplayMode::default(),
            power_duration_secs: 10,
            tick_ms: 200,
            death_pause_ms: 1000,
            lives: 3,
        }
    }
}

impl Config {
    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }

    /// Parse and validate a configuration from JSON text.
    pub fn from_json(source: &str) -> Result<Self, LoadError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but cannot run.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.lives == 0 {
            return Err(ConfigError::ZeroLives);
        }
        Ok(())
    }

    /// The timing and rules part of the configuration.
    pub const fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            tick: Duration::from_millis(self.tick_ms),
            death_pause: Duration::from_millis(self.death_pause_ms),
            power_duration: Duration::from_secs(self.power_duration_secs),
            lives: self.lives,
        }
    }
}
