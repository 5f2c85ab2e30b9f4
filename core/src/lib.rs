#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

use alloc::{vec, vec::Vec};
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use sink::*;
pub use types::*;

mod cascade;
mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod sink;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    /// Smallest accepted board side.
    pub const MIN_SIZE: Coord = 3;

    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size < Self::MIN_SIZE || self.mines > self.total_cells() {
            Err(GameError::InvalidConfiguration {
                size: self.size,
                mines: self.mines,
            })
        } else {
            Ok(())
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(8, 10)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl StepOutcome {
    pub const fn has_update(self) -> bool {
        use StepOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
