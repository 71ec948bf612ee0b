//! Lane Hopper - simulation core for a tile-hopping runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (road generation, jump motion, game state)
//! - `config`: Validated game configuration with JSON loading
//! - `hud`: Contracts for the display and tile rendering sinks
//! - `error`: Configuration and misuse errors

pub mod config;
pub mod error;
pub mod hud;
pub mod sim;

pub use config::GameConfig;
pub use error::{GameError, Result};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the frame driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Number of tiles in a generated road
    pub const ROAD_LENGTH: usize = 50;
    /// Width of one tile along the travel axis (world units)
    pub const TILE_WIDTH: f32 = 40.0;

    /// Seconds a single-tile hop takes
    pub const ONE_STEP_DURATION: f32 = 0.3;
    /// Seconds a double-tile hop takes
    pub const TWO_STEP_DURATION: f32 = 0.3;
    /// Seconds between entering play and accepting input
    pub const INPUT_ENABLE_DELAY: f32 = 0.1;
}

/// Offset of a lane index along the travel axis
#[inline]
pub fn tile_x(index: usize, tile_width: f32) -> f32 {
    index as f32 * tile_width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_x() {
        assert_eq!(tile_x(0, consts::TILE_WIDTH), 0.0);
        assert_eq!(tile_x(3, consts::TILE_WIDTH), 120.0);
    }
}
