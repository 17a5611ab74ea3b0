//! Startup configuration.
//!
//! Fixed for the whole session. Loaded from JSON when a file is given; every
//! missing field falls back to its default.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{
    DEFAULT_COLS, DEFAULT_FALL_INTERVAL_MS, DEFAULT_INPUT_REPEAT_THRESHOLD, DEFAULT_ROWS,
    DEFAULT_TILE_SIZE, SHAPE_BOX, TICK_MS,
};

/// Largest accepted grid dimension; keeps every coordinate well inside `i16`.
pub const MAX_DIMENSION: u16 = 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: u64,
        max: u64,
        value: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Grid height in cells
    pub rows: u16,
    /// Grid width in cells; a row with this many locked cells is full
    pub cols: u16,
    /// Terminal rows per cell (columns per cell is twice this)
    pub tile_size: u16,
    /// Gravity interval
    pub fall_interval_ms: u64,
    /// Ticks before the same movement symbol is accepted again
    pub input_repeat_threshold: u32,
    /// Fixed timestep of the game loop
    pub tick_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            tile_size: DEFAULT_TILE_SIZE,
            fall_interval_ms: DEFAULT_FALL_INTERVAL_MS,
            input_repeat_threshold: DEFAULT_INPUT_REPEAT_THRESHOLD,
            tick_ms: TICK_MS,
        }
    }
}

impl Config {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(s)?;
        config.validate()
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Check every field, returning the config unchanged when valid.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let box_size = SHAPE_BOX as u64;
        check("rows", self.rows as u64, box_size, MAX_DIMENSION as u64)?;
        check("cols", self.cols as u64, box_size, MAX_DIMENSION as u64)?;
        check("tile_size", self.tile_size as u64, 1, 8)?;
        check("fall_interval_ms", self.fall_interval_ms, 1, 60_000)?;
        check("tick_ms", self.tick_ms, 1, 1_000)?;
        Ok(self)
    }

    pub fn fall_interval(&self) -> Duration {
        Duration::from_millis(self.fall_interval_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

fn check(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}
