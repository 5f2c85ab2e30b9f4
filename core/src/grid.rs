use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square board of [`Cell`]s addressed by row-major index `row * size + col`.
///
/// Accessors taking a raw index expect it to be in `0..size²` and panic
/// otherwise; callers validate player coordinates before reaching this layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellGrid {
    cells: Array2<Cell>,
}

impl CellGrid {
    pub fn new(size: Coord) -> Self {
        Self {
            cells: Array2::default((size, size).to_nd_index()),
        }
    }

    /// Builds a board with mines at the given indices and fills in every
    /// adjacent count.
    pub fn from_mine_indices(size: Coord, mines: &[usize]) -> Self {
        let mut grid = Self::new(size);
        for &index in mines {
            grid.set_content(index, CellContent::Mine);
        }
        grid.fill_adjacent_counts();
        grid
    }

    pub fn size(&self) -> Coord {
        // both axes share the same length and were built from a `Coord`
        self.cells.nrows() as Coord
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        row < self.size() && col < self.size()
    }

    pub fn index_of(&self, (row, col): Coord2) -> usize {
        usize::from(row) * usize::from(self.size()) + usize::from(col)
    }

    pub fn coords_of(&self, index: usize) -> Coord2 {
        let size = usize::from(self.size());
        ((index / size) as Coord, (index % size) as Coord)
    }

    pub fn get(&self, index: usize) -> Cell {
        self.cells[self.nd_index(index)]
    }

    /// Panics when `content` carries an adjacent count above [`MAX_ADJACENT`].
    pub fn set_content(&mut self, index: usize, content: CellContent) {
        let nd_index = self.nd_index(index);
        self.cells[nd_index].set_content(content);
    }

    pub fn set_visibility(&mut self, index: usize, visibility: Visibility) {
        let nd_index = self.nd_index(index);
        self.cells[nd_index].set_visibility(visibility);
    }

    pub fn has_visibility(&self, index: usize, visibility: Visibility) -> bool {
        self.get(index).is(visibility)
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn mine_count(&self) -> CellCount {
        self.iter().filter(|cell| cell.content().is_mine()).count() as CellCount
    }

    pub fn count_visible(&self, visibility: Visibility) -> CellCount {
        self.iter().filter(|cell| cell.is(visibility)).count() as CellCount
    }

    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        neighbor_index(usize::from(self.size()), index, direction)
    }

    pub fn iter_neighbors(&self, index: usize) -> NeighborIter {
        NeighborIter::new(index, usize::from(self.size()))
    }

    pub fn count_mines_around(&self, index: usize) -> u8 {
        Direction::ALL
            .iter()
            .filter_map(|&direction| self.neighbor(index, direction))
            .filter(|&pos| self.get(pos).content().is_mine())
            .fold(0, |count, _| count + 1)
    }

    /// Recomputes the adjacent count of every non-mine cell.
    pub fn fill_adjacent_counts(&mut self) {
        for index in 0..self.len() {
            if !self.get(index).content().is_mine() {
                let count = self.count_mines_around(index);
                self.set_content(index, CellContent::Adjacent(count));
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.iter().map(Cell::pack).collect())
    }

    /// Decodes a snapshot for a board of side `size`, rejecting it whole when
    /// its length or any cell code is invalid.
    pub fn from_snapshot(size: Coord, snapshot: &Snapshot) -> Result<Self> {
        let expected = usize::from(square(size));
        let actual = snapshot.len();
        if actual != expected {
            return Err(GameError::DataSizeMismatch { expected, actual });
        }

        let cells = snapshot
            .as_slice()
            .iter()
            .map(|&code| Cell::unpack(code))
            .collect::<Result<Vec<_>>>()?;
        let cells = Array2::from_shape_vec((size, size).to_nd_index(), cells)
            .map_err(|_| GameError::DataSizeMismatch { expected, actual })?;
        Ok(Self { cells })
    }

    fn nd_index(&self, index: usize) -> [usize; 2] {
        let size = usize::from(self.size());
        [index / size, index % size]
    }
}

/// Opaque save-state: one packed code per cell in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Vec<u8>);

impl Snapshot {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Snapshot {
    fn from(codes: Vec<u8>) -> Self {
        Self(codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_counts_match_neighbors() {
        // M . .
        // . . .
        // . . M
        let grid = CellGrid::from_mine_indices(3, &[0, 8]);

        assert_eq!(grid.mine_count(), 2);
        assert_eq!(grid.get(0).content(), CellContent::Mine);
        assert_eq!(grid.get(1).content(), CellContent::Adjacent(1));
        assert_eq!(grid.get(2).content(), CellContent::Adjacent(0));
        assert_eq!(grid.get(4).content(), CellContent::Adjacent(2));
        assert_eq!(grid.get(6).content(), CellContent::Adjacent(0));
        assert_eq!(grid.get(8).content(), CellContent::Mine);
    }

    #[test]
    fn fully_mined_board_has_no_counts() {
        let all: Vec<usize> = (0..9).collect();
        let grid = CellGrid::from_mine_indices(3, &all);
        assert!(grid.iter().all(|cell| cell.content().is_mine()));
    }

    #[test]
    fn count_mines_around_center_of_full_ring() {
        let ring = [0, 1, 2, 3, 5, 6, 7, 8];
        let grid = CellGrid::from_mine_indices(3, &ring);
        assert_eq!(grid.count_mines_around(4), 8);
        assert_eq!(grid.get(4).content(), CellContent::Adjacent(8));
    }

    #[test]
    fn setters_touch_only_their_field() {
        let mut grid = CellGrid::from_mine_indices(4, &[5]);
        grid.set_visibility(5, Visibility::Flagged);
        assert_eq!(grid.get(5).content(), CellContent::Mine);

        grid.set_content(5, CellContent::Adjacent(2));
        assert!(grid.has_visibility(5, Visibility::Flagged));
    }

    #[test]
    #[should_panic(expected = "invalid cell content")]
    fn set_content_rejects_count_above_eight() {
        let mut grid = CellGrid::new(3);
        grid.set_content(0, CellContent::Adjacent(0x20));
    }

    #[test]
    fn rejected_content_leaves_cell_untouched() {
        let mut grid = CellGrid::new(3);
        grid.set_visibility(0, Visibility::Flagged);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            grid.set_content(0, CellContent::Adjacent(9));
        }));

        assert!(result.is_err());
        assert_eq!(
            grid.get(0),
            Cell::new(CellContent::Adjacent(0), Visibility::Flagged)
        );
        assert_eq!(CellGrid::from_snapshot(3, &grid.snapshot()), Ok(grid));
    }

    #[test]
    fn coords_round_trip_through_index() {
        let grid = CellGrid::new(5);
        assert_eq!(grid.index_of((2, 3)), 13);
        assert_eq!(grid.coords_of(13), (2, 3));
        assert!(grid.contains((4, 4)));
        assert!(!grid.contains((5, 0)));
    }

    #[test]
    #[should_panic]
    fn out_of_range_index_panics() {
        let grid = CellGrid::new(3);
        grid.get(9);
    }

    #[test]
    fn snapshot_rejects_wrong_length() {
        let snapshot = Snapshot::from(vec![0; 8]);
        assert_eq!(
            CellGrid::from_snapshot(3, &snapshot),
            Err(GameError::DataSizeMismatch {
                expected: 9,
                actual: 8
            })
        );
    }

    #[test]
    fn snapshot_restores_same_cells() {
        let mut grid = CellGrid::from_mine_indices(3, &[4]);
        grid.set_visibility(0, Visibility::Open);
        grid.set_visibility(4, Visibility::Flagged);

        let restored = CellGrid::from_snapshot(3, &grid.snapshot()).unwrap();
        assert_eq!(restored, grid);
    }
}
