//! Landing evaluation

use serde::{Deserialize, Serialize};

use super::road::Tile;

/// Outcome of a finished hop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    Fail,
}

/// Judge a landing: off the end of the road or onto a gap fails.
pub fn evaluate(move_index: u32, road: &[Tile]) -> Verdict {
    match road.get(move_index as usize) {
        Some(Tile::Solid) => Verdict::Pass,
        Some(Tile::Empty) | None => Verdict::Fail,
    }
}
