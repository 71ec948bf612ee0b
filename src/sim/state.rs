//! Game state machine
//!
//! Owns the road and the player's motion, gates input, and judges every
//! landing. Observers learn about changes through queued [`GameEvent`]s.

use std::num::NonZeroUsize;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::motion::{JumpEnd, JumpStep, JumpTiming, Motion, PlayerState};
use super::result::{Verdict, evaluate};
use super::road::Road;
use crate::config::GameConfig;
use crate::error::{GameError, Result};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu shown, fresh road, waiting for the start signal
    Init,
    /// Accepting hops
    Playing,
    /// Reached the final tile (only with `finish_on_last_tile`)
    End,
}

/// Notifications for the display and tile sinks, in the order they happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MenuShown,
    MenuHidden,
    /// The road was replaced; the new one is [`GameState::road`]
    RoadGenerated { length: usize, gaps: usize },
    StepsChanged(u32),
    InputEnabled,
    InputDisabled,
    JumpStarted { step: JumpStep, move_index: u32 },
    JumpEnded { move_index: u32 },
    Landed { move_index: u32, verdict: Verdict },
    Finished { steps: u32 },
}

/// Serializable view of a running game
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub seed: u64,
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: PlayerState,
    pub jumping: bool,
    pub steps_shown: u32,
    pub input_enabled: bool,
    pub menu_visible: bool,
    pub road: Road,
}

#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    seed: u64,
    config: GameConfig,
    road_length: NonZeroUsize,
    rng: Pcg32,
    phase: GamePhase,
    road: Road,
    motion: Motion,
    input_enabled: bool,
    /// Seconds until input turns on after entering play
    input_enable_in: Option<f32>,
    menu_visible: bool,
    steps_shown: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game in `Init` with a road drawn from `seed`
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::build(config, seed, None)
    }

    /// Create a game in `Init` whose first road is `road`. Later roads are
    /// generated from `seed` as usual.
    pub fn with_road(config: GameConfig, seed: u64, road: Road) -> Result<Self> {
        Self::build(config, seed, Some(road))
    }

    fn build(config: GameConfig, seed: u64, road: Option<Road>) -> Result<Self> {
        config.validate()?;
        let road_length =
            NonZeroUsize::new(config.road_length).ok_or(GameError::InvalidRoadLength)?;
        if let Some(road) = &road {
            if road.len() != road_length.get() {
                return Err(GameError::RoadLengthMismatch {
                    expected: road_length.get(),
                    actual: road.len(),
                });
            }
        }
        let motion = Motion::new(config.tile_width)?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let road = road.unwrap_or_else(|| Road::generate_nonzero(road_length, &mut rng));

        let mut state = Self {
            seed,
            motion,
            config,
            road_length,
            rng,
            phase: GamePhase::Init,
            road,
            input_enabled: false,
            input_enable_in: None,
            menu_visible: false,
            steps_shown: 0,
            time_ticks: 0,
            events: Vec::new(),
        };
        state.init_entry();
        log::info!("Game initialized with seed: {}", seed);
        Ok(state)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn road(&self) -> &Road {
        &self.road
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    #[inline]
    pub fn player(&self) -> &PlayerState {
        self.motion.player()
    }

    #[inline]
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn menu_visible(&self) -> bool {
        self.menu_visible
    }

    /// Step count currently on display
    pub fn steps_shown(&self) -> u32 {
        self.steps_shown
    }

    /// Take the events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            seed: self.seed,
            time_ticks: self.time_ticks,
            phase: self.phase,
            player: *self.motion.player(),
            jumping: self.motion.is_jumping(),
            steps_shown: self.steps_shown,
            input_enabled: self.input_enabled,
            menu_visible: self.menu_visible,
            road: self.road.clone(),
        }
    }

    /// Start signal. `Init` begins play; `End` goes back to `Init` for a new
    /// road. Ignored while playing.
    pub fn start(&mut self) -> bool {
        match self.phase {
            GamePhase::Init => {
                self.phase = GamePhase::Playing;
                self.set_menu(false);
                self.steps_shown = 0;
                self.events.push(GameEvent::StepsChanged(0));
                self.input_enable_in = Some(self.config.input_enable_delay);
                log::info!("Playing");
                true
            }
            GamePhase::End => {
                self.enter_init();
                true
            }
            GamePhase::Playing => false,
        }
    }

    /// Force a return to `Init` from any phase. Refused while a hop is in
    /// flight, since hops cannot be cancelled.
    pub fn reset(&mut self) -> Result<()> {
        if self.motion.is_jumping() {
            return Err(GameError::JumpInFlight);
        }
        self.enter_init();
        Ok(())
    }

    /// Deliver a hop request from the input source
    pub fn request_jump(&mut self, step: JumpStep) -> bool {
        if self.phase != GamePhase::Playing || !self.input_enabled {
            log::trace!("Input disabled, dropping {:?} hop", step);
            return false;
        }

        let duration = self.config.duration(step);
        if !self.motion.request_jump(step, duration) {
            return false;
        }
        self.events.push(GameEvent::JumpStarted {
            step,
            move_index: self.motion.player().move_index,
        });
        true
    }

    /// Advance timers and the active hop by `dt` seconds. Returns the verdict
    /// if a hop landed during this update.
    pub fn update(&mut self, dt: f32) -> Option<Verdict> {
        let dt = dt.max(0.0);

        if let Some(remaining) = self.input_enable_in.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.input_enable_in = None;
                self.set_input(true);
            }
        }

        let end = self.motion.advance(dt)?;
        Some(self.on_jump_end(end))
    }

    fn on_jump_end(&mut self, end: JumpEnd) -> Verdict {
        let road_len = u32::try_from(self.road.len()).unwrap_or(u32::MAX);
        self.steps_shown = end.move_index.min(road_len);
        self.events.push(GameEvent::JumpEnded {
            move_index: end.move_index,
        });
        self.events.push(GameEvent::StepsChanged(self.steps_shown));

        let verdict = evaluate(end.move_index, self.road.tiles());
        self.events.push(GameEvent::Landed {
            move_index: end.move_index,
            verdict,
        });

        match verdict {
            Verdict::Fail => {
                log::info!("Missed at tile {}, back to start", end.move_index);
                self.enter_init();
            }
            Verdict::Pass => {
                let on_last_tile = end.move_index as usize + 1 == self.road.len();
                if self.config.finish_on_last_tile && on_last_tile {
                    self.phase = GamePhase::End;
                    self.input_enable_in = None;
                    self.set_input(false);
                    self.set_menu(true);
                    self.events.push(GameEvent::Finished {
                        steps: self.steps_shown,
                    });
                    log::info!("Road cleared in {} steps", self.steps_shown);
                }
            }
        }
        verdict
    }

    fn enter_init(&mut self) {
        self.road = Road::generate_nonzero(self.road_length, &mut self.rng);
        self.init_entry();
    }

    /// Init entry for the road just installed: menu on, input off, player
    /// back at the origin
    fn init_entry(&mut self) {
        self.phase = GamePhase::Init;
        self.set_menu(true);

        self.events.push(GameEvent::RoadGenerated {
            length: self.road.len(),
            gaps: self.road.gap_count(),
        });

        self.input_enable_in = None;
        self.set_input(false);

        if let Err(err) = self.motion.reset() {
            log::error!("Player not reset: {}", err);
        }
        log::info!("Init: road of {} tiles ready", self.road.len());
    }

    fn set_menu(&mut self, visible: bool) {
        self.menu_visible = visible;
        self.events.push(if visible {
            GameEvent::MenuShown
        } else {
            GameEvent::MenuHidden
        });
    }

    fn set_input(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        self.events.push(if enabled {
            GameEvent::InputEnabled
        } else {
            GameEvent::InputDisabled
        });
    }
}
