//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod motion;
pub mod result;
pub mod road;
pub mod state;
pub mod tick;

pub use motion::{JumpAction, JumpEnd, JumpStep, JumpTiming, Motion, PlayerState};
pub use result::{Verdict, evaluate};
pub use road::{Road, Tile};
pub use state::{GameEvent, GamePhase, GameState, Snapshot};
pub use tick::{TickInput, tick};
