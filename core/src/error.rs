use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {size}x{size} board with {mines} mines")]
    InvalidConfiguration { size: Coord, mines: CellCount },
    #[error("Snapshot holds {actual} cells but the board has {expected}")]
    DataSizeMismatch { expected: usize, actual: usize },
    #[error("Cell ({row}, {col}) is outside the board")]
    IndexOutOfRange { row: Coord, col: Coord },
    #[error("Invalid adjacent mine count {0}")]
    InvalidAdjacentValue(u8),
    #[error("Invalid visibility bits {0:#04x}")]
    InvalidVisibility(u8),
}

pub type Result<T> = core::result::Result<T, GameError>;
