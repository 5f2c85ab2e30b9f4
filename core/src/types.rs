use serde::{Deserialize, Serialize};

/// Single coordinate axis used for the board side length and row/column positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn square(size: Coord) -> CellCount {
    let size = size as CellCount;
    size.saturating_mul(size)
}

/// Compass direction from a cell towards one of its up-to-8 neighbors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    NW,
    N,
    NE,
    W,
    E,
    SW,
    S,
    SE,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::NW,
        Direction::N,
        Direction::NE,
        Direction::W,
        Direction::E,
        Direction::SW,
        Direction::S,
        Direction::SE,
    ];

    /// Row/column displacement of this direction, north being row `-1`.
    pub const fn delta(self) -> (isize, isize) {
        use Direction::*;
        match self {
            NW => (-1, -1),
            N => (-1, 0),
            NE => (-1, 1),
            W => (0, -1),
            E => (0, 1),
            SW => (1, -1),
            S => (1, 0),
            SE => (1, 1),
        }
    }

    const fn crosses_top(self) -> bool {
        matches!(self, Self::NW | Self::N | Self::NE)
    }

    const fn crosses_bottom(self) -> bool {
        matches!(self, Self::SW | Self::S | Self::SE)
    }

    const fn crosses_left(self) -> bool {
        matches!(self, Self::NW | Self::W | Self::SW)
    }

    const fn crosses_right(self) -> bool {
        matches!(self, Self::NE | Self::E | Self::SE)
    }
}

/// Resolves the row-major index of the neighbor of `index` in `direction` on a
/// square board of side `size`, or `None` when that step leaves the board.
pub fn neighbor_index(size: usize, index: usize, direction: Direction) -> Option<usize> {
    let row = index / size;
    let col = index % size;

    let on_left = col == 0;
    let on_top = row == 0;
    let on_right = col == size - 1;
    let on_bottom = row == size - 1;

    if (on_top && direction.crosses_top())
        || (on_bottom && direction.crosses_bottom())
        || (on_left && direction.crosses_left())
        || (on_right && direction.crosses_right())
    {
        return None;
    }

    let (dr, dc) = direction.delta();
    let next_row = row.checked_add_signed(dr)?;
    let next_col = col.checked_add_signed(dc)?;
    Some(next_row * size + next_col)
}

/// Iterates the valid neighbor indices of a cell in [`Direction::ALL`] order.
#[derive(Debug)]
pub struct NeighborIter {
    center: usize,
    size: usize,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: usize, size: usize) -> Self {
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let direction = *Direction::ALL.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = neighbor_index(self.size, self.center, direction) {
                return Some(next_item);
            }
        }
    }
}
