//! Error taxonomy
//!
//! Only configuration and explicit misuse fail. Landing on a gap or running off
//! the road is a [`Verdict`](crate::sim::Verdict), never an error.

use core::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum GameError {
    /// Road length must be at least one tile
    InvalidRoadLength,
    InvalidTileWidth { width: f32 },
    InvalidJumpDuration { step: u32, duration: f32 },
    InvalidInputDelay { delay: f32 },
    /// A hand-built road breaks the spawn or gap invariant
    InvalidRoad { index: usize, reason: &'static str },
    /// A supplied road does not match the configured length
    RoadLengthMismatch { expected: usize, actual: usize },
    /// Forced reset requested while a jump is still in flight
    JumpInFlight,
    ConfigParse(String),
    Io(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRoadLength => write!(f, "road length must be at least 1"),
            Self::InvalidTileWidth { width } => {
                write!(f, "tile width must be positive and finite, got {width}")
            }
            Self::InvalidJumpDuration { step, duration } => write!(
                f,
                "jump duration for step {step} must be positive and finite, got {duration}"
            ),
            Self::InvalidInputDelay { delay } => {
                write!(f, "input enable delay must be non-negative, got {delay}")
            }
            Self::InvalidRoad { index, reason } => {
                write!(f, "invalid road at tile {index}: {reason}")
            }
            Self::RoadLengthMismatch { expected, actual } => write!(
                f,
                "road has {actual} tiles but the config asks for {expected}"
            ),
            Self::JumpInFlight => write!(f, "cannot reset while a jump is in flight"),
            Self::ConfigParse(msg) => write!(f, "failed to parse config: {msg}"),
            Self::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
