#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use grid::*;
pub use square::*;
pub use types::*;

mod board;
mod error;
mod game;
mod generator;
mod grid;
mod square;
mod types;

/// Chance of any single square holding a mine on a default board.
pub const DEFAULT_MINE_PROBABILITY: f64 = 0.2;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mine_probability: f64,
    pub flooding: bool,
    /// Mine placement seed, a random one is drawn when absent.
    pub seed: Option<u64>,
    #[serde(default)]
    pub limits: SizeLimits,
}

impl GameConfig {
    pub const fn new(width: Coord, height: Coord, mine_probability: f64, flooding: bool) -> Self {
        Self {
            width,
            height,
            mine_probability,
            flooding,
            seed: None,
            limits: SizeLimits::new(MINIMUM_BOARD_SIZE, MAXIMUM_BOARD_SIZE),
        }
    }

    /// Square board with default probability and flooding enabled.
    pub const fn square(size: Coord) -> Self {
        Self::new(size, size, DEFAULT_MINE_PROBABILITY, true)
    }

    pub const fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::square(10)
    }
}
