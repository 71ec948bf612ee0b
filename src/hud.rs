//! Display and tile rendering contracts
//!
//! The simulation never talks to a renderer. Frontends implement these traits
//! and feed them the events drained from [`GameState`] each frame.

use crate::sim::{GameEvent, GameState, Road, Tile};
use crate::tile_x;

/// Step counter label and start menu
pub trait Hud {
    fn show_menu(&mut self, visible: bool);
    fn set_steps(&mut self, label: &str);
}

/// Visual representation of the lane
pub trait TileSink {
    /// Drop every tile of the previous road
    fn clear(&mut self);
    /// Place one tile at lane `index`, `x` units along the travel axis
    fn place_tile(&mut self, index: usize, tile: Tile, x: f32);
}

/// Replace the rendered lane with `road`
pub fn place_road(road: &Road, tile_width: f32, sink: &mut impl TileSink) {
    sink.clear();
    for (index, tile) in road.iter_tiles() {
        sink.place_tile(index, tile, tile_x(index, tile_width));
    }
}

/// Forward drained events to the sinks, in order.
///
/// `RoadGenerated` renders the game's current road, so call this with the
/// state the events were drained from.
pub fn dispatch(
    events: &[GameEvent],
    state: &GameState,
    hud: &mut impl Hud,
    tiles: &mut impl TileSink,
) {
    for event in events {
        match event {
            GameEvent::MenuShown => hud.show_menu(true),
            GameEvent::MenuHidden => hud.show_menu(false),
            GameEvent::StepsChanged(steps) => hud.set_steps(&steps.to_string()),
            GameEvent::RoadGenerated { .. } => {
                place_road(state.road(), state.config().tile_width, tiles)
            }
            _ => {}
        }
    }
}
