//! Jump motion controller
//!
//! Drives the player through one hop at a time. A hop moves the player a whole
//! number of tiles along +X at constant speed and finishes by snapping onto its
//! target, so no interpolation error survives the landing.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// How far a single hop travels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JumpStep {
    /// Primary action: next tile
    One,
    /// Secondary action: skip a tile
    Two,
}

impl JumpStep {
    /// Number of tiles covered
    #[inline]
    pub fn tiles(self) -> u32 {
        match self {
            JumpStep::One => 1,
            JumpStep::Two => 2,
        }
    }

    pub fn from_tiles(tiles: u32) -> Option<Self> {
        match tiles {
            1 => Some(JumpStep::One),
            2 => Some(JumpStep::Two),
            _ => None,
        }
    }

    /// Map a DOM-style mouse button code (0 = left, 2 = right) to a hop
    pub fn from_button(button: i16) -> Option<Self> {
        match button {
            0 => Some(JumpStep::One),
            2 => Some(JumpStep::Two),
            _ => None,
        }
    }
}

/// Source of hop durations (normally the length of the matching animation)
pub trait JumpTiming {
    fn duration(&self, step: JumpStep) -> f32;
}

/// Player data owned by the motion controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Vec3,
    /// Tiles advanced since the last reset, committed when a hop starts
    pub move_index: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            move_index: 0,
        }
    }
}

/// The hop currently in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpAction {
    pub step: JumpStep,
    pub duration: f32,
    pub elapsed: f32,
    pub start: Vec3,
    pub target: Vec3,
    /// Units per second along X
    pub speed: f32,
}

/// Emitted exactly once when a hop finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpEnd {
    pub move_index: u32,
}

#[derive(Debug, Clone)]
pub struct Motion {
    tile_width: f32,
    player: PlayerState,
    action: Option<JumpAction>,
}

impl Motion {
    /// Fails unless `tile_width` is positive and finite
    pub fn new(tile_width: f32) -> Result<Self> {
        if !(tile_width > 0.0 && tile_width.is_finite()) {
            return Err(GameError::InvalidTileWidth { width: tile_width });
        }
        Ok(Self {
            tile_width,
            player: PlayerState::default(),
            action: None,
        })
    }

    #[inline]
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    #[inline]
    pub fn action(&self) -> Option<&JumpAction> {
        self.action.as_ref()
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.action.is_some()
    }

    pub fn tile_width(&self) -> f32 {
        self.tile_width
    }

    /// Move the player back to the origin. Refused while a hop is in flight.
    pub fn reset(&mut self) -> Result<()> {
        if self.is_jumping() {
            return Err(GameError::JumpInFlight);
        }
        self.player = PlayerState::default();
        Ok(())
    }

    /// Start a hop. Returns false if one is already in flight or `duration`
    /// is not a positive number; neither case changes any state.
    pub fn request_jump(&mut self, step: JumpStep, duration: f32) -> bool {
        if self.is_jumping() {
            log::trace!("Ignoring {:?} hop, already jumping", step);
            return false;
        }
        if !(duration > 0.0 && duration.is_finite()) {
            log::warn!("Rejecting {:?} hop with duration {}", step, duration);
            return false;
        }

        let distance = step.tiles() as f32 * self.tile_width;
        let start = self.player.position;
        self.action = Some(JumpAction {
            step,
            duration,
            elapsed: 0.0,
            start,
            target: start + Vec3::new(distance, 0.0, 0.0),
            speed: distance / duration,
        });
        self.player.move_index += step.tiles();

        log::debug!(
            "Hop {:?} started at x={}, move index now {}",
            step,
            start.x,
            self.player.move_index
        );
        true
    }

    /// Advance the active hop by `dt` seconds.
    ///
    /// Returns the landing once elapsed time passes the duration; the player
    /// is placed exactly on the target regardless of how far `dt` overshoots.
    pub fn advance(&mut self, dt: f32) -> Option<JumpEnd> {
        let dt = dt.max(0.0);
        let action = self.action.as_mut()?;
        action.elapsed += dt;

        if action.elapsed > action.duration {
            self.player.position = action.target;
            self.action = None;

            let end = JumpEnd {
                move_index: self.player.move_index,
            };
            log::debug!(
                "Hop landed at x={}, move index {}",
                self.player.position.x,
                end.move_index
            );
            Some(end)
        } else {
            self.player.position.x += action.speed * dt;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WIDTH: f32 = 40.0;

    #[test]
    fn test_step_mapping() {
        assert_eq!(JumpStep::from_tiles(1), Some(JumpStep::One));
        assert_eq!(JumpStep::from_tiles(2), Some(JumpStep::Two));
        assert_eq!(JumpStep::from_tiles(3), None);
        assert_eq!(JumpStep::from_button(0), Some(JumpStep::One));
        assert_eq!(JumpStep::from_button(2), Some(JumpStep::Two));
        assert_eq!(JumpStep::from_button(1), None);
    }

    #[test]
    fn test_invalid_tile_width_rejected() {
        for width in [0.0, -40.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                Motion::new(width),
                Err(GameError::InvalidTileWidth { .. })
            ));
        }
    }

    #[test]
    fn test_idle_advance_is_noop() {
        let mut motion = Motion::new(WIDTH).unwrap();
        assert_eq!(motion.advance(1.0), None);
        assert_eq!(*motion.player(), PlayerState::default());
    }

    #[test]
    fn test_move_index_committed_at_start() {
        let mut motion = Motion::new(WIDTH).unwrap();
        assert!(motion.request_jump(JumpStep::Two, 0.5));
        assert_eq!(motion.player().move_index, 2);
        assert!(motion.is_jumping());
        assert_eq!(motion.player().position, Vec3::ZERO);
    }

    #[test]
    fn test_linear_interpolation() {
        let mut motion = Motion::new(WIDTH).unwrap();
        motion.request_jump(JumpStep::One, 0.5);

        assert_eq!(motion.advance(0.25), None);
        assert_eq!(motion.player().position, Vec3::new(20.0, 0.0, 0.0));

        // Reaching the duration exactly is not yet a landing
        assert_eq!(motion.advance(0.25), None);
        assert!(motion.is_jumping());

        let end = motion.advance(0.125);
        assert_eq!(end, Some(JumpEnd { move_index: 1 }));
        assert_eq!(motion.player().position, Vec3::new(40.0, 0.0, 0.0));
        assert!(!motion.is_jumping());
    }

    #[test]
    fn test_large_overshoot_snaps_to_target() {
        let mut motion = Motion::new(WIDTH).unwrap();
        motion.request_jump(JumpStep::Two, 0.3);
        let end = motion.advance(10.0);
        assert_eq!(end, Some(JumpEnd { move_index: 2 }));
        assert_eq!(motion.player().position.x, 80.0);
    }

    #[test]
    fn test_redundant_request_is_ignored() {
        let mut motion = Motion::new(WIDTH).unwrap();
        assert!(motion.request_jump(JumpStep::One, 0.5));
        motion.advance(0.125);
        let before = *motion.action().unwrap();

        assert!(!motion.request_jump(JumpStep::Two, 2.0));
        assert_eq!(*motion.action().unwrap(), before);
        assert_eq!(motion.player().move_index, 1);
    }

    #[test]
    fn test_invalid_duration_rejected() {
        let mut motion = Motion::new(WIDTH).unwrap();
        assert!(!motion.request_jump(JumpStep::One, 0.0));
        assert!(!motion.request_jump(JumpStep::One, -1.0));
        assert!(!motion.request_jump(JumpStep::One, f32::NAN));
        assert!(!motion.is_jumping());
        assert_eq!(motion.player().move_index, 0);
    }

    #[test]
    fn test_negative_dt_treated_as_zero() {
        let mut motion = Motion::new(WIDTH).unwrap();
        motion.request_jump(JumpStep::One, 0.5);
        assert_eq!(motion.advance(-1.0), None);
        assert_eq!(motion.action().unwrap().elapsed, 0.0);
        assert_eq!(motion.player().position, Vec3::ZERO);
    }

    #[test]
    fn test_reset_refused_mid_hop() {
        let mut motion = Motion::new(WIDTH).unwrap();
        motion.request_jump(JumpStep::One, 0.5);
        assert_eq!(motion.reset(), Err(GameError::JumpInFlight));

        motion.advance(1.0);
        assert_eq!(motion.reset(), Ok(()));
        assert_eq!(*motion.player(), PlayerState::default());
    }

    proptest! {
        #[test]
        fn prop_single_landing_on_exact_target(
            two in any::<bool>(),
            duration in 0.01f32..2.0,
            frames in 1usize..40,
            prior_hops in 0u32..5,
        ) {
            let step = if two { JumpStep::Two } else { JumpStep::One };
            let mut motion = Motion::new(WIDTH).unwrap();
            for _ in 0..prior_hops {
                motion.request_jump(JumpStep::One, 0.1);
                motion.advance(1.0);
            }
            let prior = *motion.player();

            prop_assert!(motion.request_jump(step, duration));
            let dt = duration / frames as f32;
            let mut landings = Vec::new();
            // Run well past the duration; only one landing may ever fire
            for _ in 0..(frames * 2 + 2) {
                if let Some(end) = motion.advance(dt) {
                    landings.push(end);
                }
            }

            prop_assert_eq!(landings.len(), 1);
            prop_assert_eq!(landings[0].move_index, prior.move_index + step.tiles());
            let expected = prior.position.x + step.tiles() as f32 * WIDTH;
            prop_assert_eq!(motion.player().position.x, expected);
            prop_assert_eq!(motion.player().position.y, 0.0);
        }
    }
}
