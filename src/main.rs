//! Lane Hopper headless runner
//!
//! Drives the simulation with a look-ahead autopilot and logs what a frontend
//! would display. Useful for checking seeds and configs without a renderer.

use std::path::PathBuf;

use clap::Parser;

use lane_hopper::GameConfig;
use lane_hopper::consts::*;
use lane_hopper::hud::{Hud, TileSink, dispatch};
use lane_hopper::sim::{GameEvent, GamePhase, GameState, JumpStep, TickInput, Tile, Verdict, tick};

#[derive(Parser)]
#[command(name = "lane-hopper")]
#[command(about = "Run the lane hopper simulation headless with an autopilot")]
struct Args {
    /// Run seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seconds of simulated time to run
    #[arg(long, default_value_t = 30.0)]
    seconds: f32,
    /// Render frame time in seconds; the sim substeps at a fixed rate
    #[arg(long, default_value_t = 1.0 / 30.0)]
    frame: f32,
    /// Chance per hop that the autopilot picks the wrong step
    #[arg(long, default_value_t = 0.0)]
    blunder: f64,
    /// Print the final state as JSON
    #[arg(long)]
    json: bool,
}

/// Logs HUD updates
struct LogHud;

impl Hud for LogHud {
    fn show_menu(&mut self, visible: bool) {
        log::debug!("Menu {}", if visible { "shown" } else { "hidden" });
    }

    fn set_steps(&mut self, label: &str) {
        log::info!("Steps: {}", label);
    }
}

/// Text rendering of the lane, `#` solid and `_` gap
#[derive(Default)]
struct LaneText(String);

impl TileSink for LaneText {
    fn clear(&mut self) {
        self.0.clear();
    }

    fn place_tile(&mut self, _index: usize, tile: Tile, _x: f32) {
        self.0.push(if tile.is_solid() { '#' } else { '_' });
    }
}

/// Hop over a gap, otherwise take the next tile
fn autopilot(state: &GameState) -> Option<JumpStep> {
    if state.motion().is_jumping() || !state.input_enabled() {
        return None;
    }
    let next = state.player().move_index as usize + 1;
    match state.road().get(next)? {
        Tile::Solid => Some(JumpStep::One),
        Tile::Empty => Some(JumpStep::Two),
    }
}

/// Game instance with its frame accumulator
struct Runner {
    state: GameState,
    hud: LogHud,
    lane: LaneText,
    accumulator: f32,
    rng: rand_pcg::Pcg32,
    blunder: f64,
    landings: u32,
    misses: u32,
    best: u32,
}

impl Runner {
    fn new(state: GameState, blunder: f64) -> Self {
        use rand::SeedableRng;
        let rng = rand_pcg::Pcg32::seed_from_u64(state.seed() ^ 0x5EED);
        Self {
            state,
            hud: LogHud,
            lane: LaneText::default(),
            accumulator: 0.0,
            rng,
            blunder,
            landings: 0,
            misses: 0,
            best: 0,
        }
    }

    fn flush_events(&mut self) {
        let events = self.state.drain_events();
        dispatch(&events, &self.state, &mut self.hud, &mut self.lane);
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::RoadGenerated { .. }))
        {
            log::info!("Road: {}", self.lane.0);
        }
    }

    fn next_input(&mut self) -> TickInput {
        use rand::Rng;

        if matches!(self.state.phase(), GamePhase::Init | GamePhase::End) {
            return TickInput::start();
        }
        let Some(mut step) = autopilot(&self.state) else {
            return TickInput::default();
        };
        if self.blunder > 0.0 && self.rng.random_bool(self.blunder.min(1.0)) {
            step = match step {
                JumpStep::One => JumpStep::Two,
                JumpStep::Two => JumpStep::One,
            };
        }
        TickInput::jump(step)
    }

    /// Run simulation ticks for one rendered frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.next_input();
            match tick(&mut self.state, &input, SIM_DT) {
                Some(Verdict::Pass) => {
                    self.landings += 1;
                    self.best = self.best.max(self.state.steps_shown());
                }
                Some(Verdict::Fail) => {
                    self.misses += 1;
                    log::info!("Run over after {} steps", self.state.steps_shown());
                }
                None => {}
            }
            self.flush_events();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }
}

fn run(args: Args) -> lane_hopper::Result<()> {
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let state = GameState::new(config, seed)?;

    let mut runner = Runner::new(state, args.blunder);
    runner.flush_events();

    let frame = if args.frame > 0.0 { args.frame } else { SIM_DT };
    let frames = (args.seconds.max(0.0) / frame).ceil() as u64;
    for _ in 0..frames {
        runner.update(frame);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&runner.state.snapshot())?);
    } else {
        println!("Seed:     {}", seed);
        println!("Phase:    {:?}", runner.state.phase());
        println!("Landings: {}", runner.landings);
        println!("Misses:   {}", runner.misses);
        println!("Best run: {} steps", runner.best);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Lane Hopper (headless) starting...");

    if let Err(err) = run(Args::parse()) {
        log::error!("{}", err);
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
