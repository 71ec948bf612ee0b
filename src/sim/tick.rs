//! Frame driver
//!
//! Applies the input queued since the last frame, then advances the game by
//! one frame. Input never preempts a frame, so the motion controller's
//! one-hop-at-a-time rule is the only guard needed.

use super::motion::JumpStep;
use super::result::Verdict;
use super::state::GameState;

/// Input events queued for a single frame, applied in field order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Force a return to the start menu
    pub reset: bool,
    /// Start button
    pub start: bool,
    /// Hop requests in arrival order (primary = one tile, secondary = two)
    pub jumps: Vec<JumpStep>,
}

impl TickInput {
    pub fn jump(step: JumpStep) -> Self {
        Self {
            jumps: vec![step],
            ..Default::default()
        }
    }

    pub fn start() -> Self {
        Self {
            start: true,
            ..Default::default()
        }
    }
}

/// Advance the game by one frame of `dt` seconds.
///
/// A landing that happens this frame is fully handled (step counter, verdict,
/// possible reset) before this returns.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Option<Verdict> {
    if input.reset {
        if let Err(err) = state.reset() {
            log::warn!("Reset ignored: {}", err);
        }
    }

    if input.start {
        state.start();
    }

    for &step in &input.jumps {
        state.request_jump(step);
    }

    state.time_ticks += 1;
    state.update(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::consts::SIM_DT;
    use crate::sim::{GamePhase, Road, Tile};

    fn straight_road(len: usize) -> Road {
        Road::from_tiles(vec![Tile::Solid; len]).unwrap()
    }

    #[test]
    fn test_tick_init_to_playing() {
        let mut state = GameState::new(GameConfig::default(), 12345).unwrap();
        assert_eq!(state.phase(), GamePhase::Init);

        // Tick without start - should stay in Init
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase(), GamePhase::Init);

        tick(&mut state, &TickInput::start(), SIM_DT);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_jump_in_start_frame_is_dropped() {
        let config = GameConfig {
            input_enable_delay: 0.0,
            ..Default::default()
        };
        let mut state = GameState::with_road(config, 1, straight_road(50)).unwrap();

        let input = TickInput {
            start: true,
            jumps: vec![JumpStep::One],
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.input_enabled());
        assert!(!state.motion().is_jumping());
        assert_eq!(state.player().move_index, 0);

        tick(&mut state, &TickInput::jump(JumpStep::One), SIM_DT);
        assert!(state.motion().is_jumping());
    }

    #[test]
    fn test_burst_of_jumps_starts_one_hop() {
        let config = GameConfig {
            input_enable_delay: 0.0,
            ..Default::default()
        };
        let mut state = GameState::with_road(config, 1, straight_road(50)).unwrap();
        tick(&mut state, &TickInput::start(), SIM_DT);

        let burst = TickInput {
            jumps: vec![JumpStep::One, JumpStep::Two, JumpStep::Two],
            ..Default::default()
        };
        tick(&mut state, &burst, SIM_DT);
        assert_eq!(state.player().move_index, 1);
        assert_eq!(state.motion().action().map(|a| a.step), Some(JumpStep::One));
    }

    #[test]
    fn test_reset_mid_hop_ignored() {
        let config = GameConfig {
            input_enable_delay: 0.0,
            ..Default::default()
        };
        let mut state = GameState::with_road(config, 1, straight_road(50)).unwrap();
        tick(&mut state, &TickInput::start(), SIM_DT);
        tick(&mut state, &TickInput::jump(JumpStep::One), SIM_DT);

        let reset = TickInput {
            reset: true,
            ..Default::default()
        };
        tick(&mut state, &reset, SIM_DT);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.player().move_index, 1);
    }

    #[test]
    fn test_determinism() {
        // Two games with the same seed and inputs stay identical
        let mut state1 = GameState::new(GameConfig::default(), 99999).unwrap();
        let mut state2 = GameState::new(GameConfig::default(), 99999).unwrap();

        let mut inputs = vec![TickInput::start()];
        for i in 0..200 {
            let step = if i % 3 == 0 { JumpStep::Two } else { JumpStep::One };
            inputs.push(TickInput::jump(step));
            inputs.push(TickInput::default());
        }

        for input in &inputs {
            let a = tick(&mut state1, input, SIM_DT);
            let b = tick(&mut state2, input, SIM_DT);
            assert_eq!(a, b);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.phase(), state2.phase());
        assert_eq!(state1.road(), state2.road());
        assert_eq!(state1.player(), state2.player());
    }
}
