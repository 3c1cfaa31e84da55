use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest accepted grid side, in cells
pub const MAX_GRID_SIDE: usize = 1000;

/// What happens after the snake crashes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPolicy {
    /// Start a fresh round on the very next tick
    #[default]
    AutoReset,
    /// Freeze on a game-over screen until the player restarts
    WaitForRestart,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Number of segments the snake starts a round with
    pub initial_snake_length: usize,
    /// Milliseconds between game ticks
    pub tick_ms: u64,
    pub round_policy: RoundPolicy,
    /// Seed for food placement; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        // 640x480 playfield carved into 20px cells
        Self {
            grid_width: 32,
            grid_height: 24,
            initial_snake_length: 1,
            tick_ms: 100,
            round_policy: RoundPolicy::AutoReset,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Small seeded grid, handy for tests
    pub fn small() -> Self {
        Self {
            seed: Some(7),
            ..Self::new(10, 10)
        }
    }

    /// Parse a configuration from TOML; missing keys take their defaults
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Check that a round can actually be set up with these values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < 2 || self.grid_height < 2 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 2x2, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(ConfigError::Invalid(format!(
                "grid must be at most {MAX_GRID_SIDE}x{MAX_GRID_SIDE}, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::Invalid(
                "initial_snake_length must be at least 1".to_string(),
            ));
        }
        // The snake is laid out leftwards from the center cell
        let room = self.grid_width / 2 + 1;
        if self.initial_snake_length > room {
            return Err(ConfigError::Invalid(format!(
                "initial_snake_length {} does not fit a grid {} cells wide",
                self.initial_snake_length, self.grid_width
            )));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be non-zero".to_string()));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
