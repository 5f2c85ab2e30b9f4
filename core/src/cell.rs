use serde::{Deserialize, Serialize};

use crate::*;

/// Highest number of mines a cell can border.
pub const MAX_ADJACENT: u8 = 8;

/// Packed code of the mine content, deliberately outside `0..=MAX_ADJACENT`.
pub const MINE_CODE: u8 = 0x0F;

const CONTENT_MASK: u8 = 0x0F;
const STATE_MASK: u8 = 0xF0;
const STATE_CLOSED: u8 = 0;
const STATE_OPEN: u8 = 1 << 5;
const STATE_FLAGGED: u8 = 1 << 6;

/// What lies under a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellContent {
    Mine,
    /// Number of mines among the neighbors, `0..=8`.
    Adjacent(u8),
}

impl CellContent {
    pub fn adjacent(count: u8) -> Result<Self> {
        if count <= MAX_ADJACENT {
            Ok(Self::Adjacent(count))
        } else {
            Err(GameError::InvalidAdjacentValue(count))
        }
    }

    /// Whether a count payload is within `0..=MAX_ADJACENT`.
    pub const fn is_valid(self) -> bool {
        match self {
            Self::Mine => true,
            Self::Adjacent(count) => count <= MAX_ADJACENT,
        }
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn adjacent_count(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Adjacent(count) => Some(count),
        }
    }

    const fn code(self) -> u8 {
        match self {
            Self::Mine => MINE_CODE,
            Self::Adjacent(count) => count,
        }
    }

    fn from_code(code: u8) -> Result<Self> {
        match code {
            MINE_CODE => Ok(Self::Mine),
            count => Self::adjacent(count),
        }
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Adjacent(0)
    }
}

/// What the player currently sees of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Closed,
    Open,
    Flagged,
}

impl Visibility {
    const fn code(self) -> u8 {
        match self {
            Self::Closed => STATE_CLOSED,
            Self::Open => STATE_OPEN,
            Self::Flagged => STATE_FLAGGED,
        }
    }

    fn from_code(code: u8) -> Result<Self> {
        match code {
            STATE_CLOSED => Ok(Self::Closed),
            STATE_OPEN => Ok(Self::Open),
            STATE_FLAGGED => Ok(Self::Flagged),
            other => Err(GameError::InvalidVisibility(other)),
        }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Closed
    }
}

/// Content and visibility of a single board position, updated independently.
///
/// Serialized as its packed code so a decoded cell is always valid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Cell {
    content: CellContent,
    visibility: Visibility,
}

impl Cell {
    /// Panics when `content` carries an adjacent count above [`MAX_ADJACENT`].
    pub const fn new(content: CellContent, visibility: Visibility) -> Self {
        assert!(content.is_valid(), "adjacent count above 8");
        Self {
            content,
            visibility,
        }
    }

    pub const fn content(self) -> CellContent {
        self.content
    }

    pub const fn visibility(self) -> Visibility {
        self.visibility
    }

    /// Panics when `content` carries an adjacent count above [`MAX_ADJACENT`].
    pub fn set_content(&mut self, content: CellContent) {
        assert!(content.is_valid(), "invalid cell content {content:?}");
        self.content = content;
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    pub fn is(self, visibility: Visibility) -> bool {
        self.visibility == visibility
    }

    /// Single-byte encoding used by save-state snapshots.
    pub const fn pack(self) -> u8 {
        self.content.code() | self.visibility.code()
    }

    pub fn unpack(code: u8) -> Result<Self> {
        Ok(Self {
            content: CellContent::from_code(code & CONTENT_MASK)?,
            visibility: Visibility::from_code(code & STATE_MASK)?,
        })
    }
}

impl TryFrom<u8> for Cell {
    type Error = GameError;

    fn try_from(code: u8) -> Result<Self> {
        Self::unpack(code)
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell.pack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_rejects_counts_above_eight() {
        assert_eq!(CellContent::adjacent(8), Ok(CellContent::Adjacent(8)));
        assert_eq!(
            CellContent::adjacent(9),
            Err(GameError::InvalidAdjacentValue(9))
        );
    }

    #[test]
    fn content_and_visibility_are_independent() {
        let mut cell = Cell::default();
        cell.set_content(CellContent::Mine);
        cell.set_visibility(Visibility::Flagged);
        assert_eq!(cell.content(), CellContent::Mine);

        cell.set_content(CellContent::Adjacent(3));
        assert_eq!(cell.visibility(), Visibility::Flagged);
        assert!(cell.is(Visibility::Flagged));
    }

    #[test]
    fn packed_layout_matches_saved_games() {
        assert_eq!(Cell::new(CellContent::Adjacent(0), Visibility::Closed).pack(), 0x00);
        assert_eq!(Cell::new(CellContent::Adjacent(3), Visibility::Open).pack(), 0x23);
        assert_eq!(Cell::new(CellContent::Mine, Visibility::Flagged).pack(), 0x4F);
        assert_eq!(
            Cell::unpack(0x2F),
            Ok(Cell::new(CellContent::Mine, Visibility::Open))
        );
    }

    #[test]
    #[should_panic]
    fn set_content_rejects_count_spilling_into_state_bits() {
        let mut cell = Cell::default();
        cell.set_content(CellContent::Adjacent(0x20));
    }

    #[test]
    #[should_panic]
    fn new_rejects_count_above_eight() {
        Cell::new(CellContent::Adjacent(9), Visibility::Closed);
    }

    #[test]
    fn serde_goes_through_packed_code() {
        let cell = Cell::new(CellContent::Adjacent(3), Visibility::Open);
        assert_eq!(serde_json::to_string(&cell).unwrap(), "35");
        assert_eq!(serde_json::from_str::<Cell>("35").unwrap(), cell);
        assert!(serde_json::from_str::<Cell>("9").is_err());
        assert!(serde_json::from_str::<Cell>("32").is_ok());
        assert!(serde_json::from_str::<Cell>("96").is_err());
    }

    #[test]
    fn unpack_rejects_garbage() {
        assert_eq!(Cell::unpack(0x0A), Err(GameError::InvalidAdjacentValue(10)));
        assert_eq!(Cell::unpack(0x61), Err(GameError::InvalidVisibility(0x60)));
        assert_eq!(Cell::unpack(0x10), Err(GameError::InvalidVisibility(0x10)));
    }
}
