//! Game configuration
//!
//! Loaded from JSON; any field left out takes its default. Values are
//! validated before a game is built from them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, Result};
use crate::sim::{JumpStep, JumpTiming};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Tiles per generated road
    pub road_length: usize,
    /// World units per tile along the travel axis
    pub tile_width: f32,

    // === Timing ===
    /// Duration of a one-tile hop (seconds)
    pub one_step_duration: f32,
    /// Duration of a two-tile hop (seconds)
    pub two_step_duration: f32,
    /// Delay between entering play and accepting input (seconds)
    pub input_enable_delay: f32,

    /// Treat a safe landing on the final tile as a finished run
    pub finish_on_last_tile: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            road_length: ROAD_LENGTH,
            tile_width: TILE_WIDTH,
            one_step_duration: ONE_STEP_DURATION,
            two_step_duration: TWO_STEP_DURATION,
            input_enable_delay: INPUT_ENABLE_DELAY,
            finish_on_last_tile: false,
        }
    }
}

impl GameConfig {
    /// Reject any value the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.road_length == 0 {
            return Err(GameError::InvalidRoadLength);
        }
        if !(self.tile_width > 0.0 && self.tile_width.is_finite()) {
            return Err(GameError::InvalidTileWidth {
                width: self.tile_width,
            });
        }
        for step in [JumpStep::One, JumpStep::Two] {
            let duration = self.duration(step);
            if !(duration > 0.0 && duration.is_finite()) {
                return Err(GameError::InvalidJumpDuration {
                    step: step.tiles(),
                    duration,
                });
            }
        }
        if !(self.input_enable_delay >= 0.0 && self.input_enable_delay.is_finite()) {
            return Err(GameError::InvalidInputDelay {
                delay: self.input_enable_delay,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl JumpTiming for GameConfig {
    fn duration(&self, step: JumpStep) -> f32 {
        match step {
            JumpStep::One => self.one_step_duration,
            JumpStep::Two => self.two_step_duration,
        }
    }
}
