//! Road generation
//!
//! A road is a fixed-length lane of tiles. Tile 0 is always solid so the player
//! spawns safely, and a gap is always followed by a solid tile so every gap can
//! be cleared with a two-tile hop.

use std::num::NonZeroUsize;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// A single lane cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    /// Gap - landing here ends the run
    Empty,
    /// Landable block
    Solid,
}

impl Tile {
    #[inline]
    pub fn is_solid(self) -> bool {
        self == Tile::Solid
    }
}

/// An immutable, generated lane of tiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Road {
    tiles: Vec<Tile>,
}

impl Road {
    /// Generate a fresh road in a single forward pass.
    ///
    /// After a gap the next tile is forced solid; otherwise each tile is a fair
    /// coin flip. Each call draws new values from `rng`.
    pub fn generate<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Result<Self> {
        let length = NonZeroUsize::new(length).ok_or(GameError::InvalidRoadLength)?;
        Ok(Self::generate_nonzero(length, rng))
    }

    /// [`Road::generate`] for a length already known to be valid
    pub fn generate_nonzero<R: Rng + ?Sized>(length: NonZeroUsize, rng: &mut R) -> Self {
        let length = length.get();
        let mut tiles = Vec::with_capacity(length);
        tiles.push(Tile::Solid);

        for i in 1..length {
            let tile = if tiles[i - 1] == Tile::Empty || rng.random_bool(0.5) {
                Tile::Solid
            } else {
                Tile::Empty
            };
            tiles.push(tile);
        }

        let road = Self { tiles };
        log::info!(
            "Generated road: {} tiles, {} gaps",
            road.len(),
            road.gap_count()
        );
        road
    }

    /// Build a road from explicit tiles, checking the spawn and gap invariants
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self> {
        match tiles.first() {
            None => return Err(GameError::InvalidRoadLength),
            Some(Tile::Empty) => {
                return Err(GameError::InvalidRoad {
                    index: 0,
                    reason: "spawn tile must be solid",
                });
            }
            Some(Tile::Solid) => {}
        }

        if let Some(i) = tiles
            .windows(2)
            .position(|pair| pair[0] == Tile::Empty && pair[1] == Tile::Empty)
        {
            return Err(GameError::InvalidRoad {
                index: i + 1,
                reason: "two gaps in a row",
            });
        }

        Ok(Self { tiles })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a constructed road
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Tile> {
        self.tiles.get(index).copied()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Enumerate `(lane index, tile)` pairs for a tile renderer
    pub fn iter_tiles(&self) -> impl Iterator<Item = (usize, Tile)> + '_ {
        self.tiles.iter().copied().enumerate()
    }

    pub fn gap_count(&self) -> usize {
        self.tiles.iter().filter(|t| **t == Tile::Empty).count()
    }
}

impl AsRef<[Tile]> for Road {
    fn as_ref(&self) -> &[Tile] {
        &self.tiles
    }
}
