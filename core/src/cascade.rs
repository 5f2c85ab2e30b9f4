use crate::*;

/// Opens the zero-count region around the already opened zero cell `origin`,
/// one breadth-first wave at a time.
///
/// Only closed `Adjacent(0)` neighbors join a wave; numbered cells bordering
/// the region stay closed. Every opened cell is reported through
/// [`GameEventSink::on_save_step`]. Returns how many cells were opened.
pub(crate) fn open_zero_region<S>(grid: &mut CellGrid, origin: usize, sink: &mut S) -> CellCount
where
    S: GameEventSink + ?Sized,
{
    let mut opened: CellCount = 0;
    let mut frontier = vec![origin];
    let mut depth = 0usize;

    while !frontier.is_empty() {
        let mut wave = Vec::new();

        for &index in &frontier {
            for pos in grid.iter_neighbors(index) {
                let cell = grid.get(pos);
                if cell.is(Visibility::Closed) && cell.content() == CellContent::Adjacent(0) {
                    grid.set_visibility(pos, Visibility::Open);
                    let (row, col) = grid.coords_of(pos);
                    sink.on_save_step(row, col, 0);
                    wave.push(pos);
                }
            }
        }

        depth += 1;
        log::trace!("cascade wave {depth} opened {} cells", wave.len());
        opened += wave.len() as CellCount;
        frontier = wave;
    }

    opened
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_origin(grid: &mut CellGrid, origin: usize) {
        grid.set_visibility(origin, Visibility::Open);
    }

    #[test]
    fn empty_board_opens_everything_once() {
        let mut grid = CellGrid::from_mine_indices(3, &[]);
        let mut events: Vec<GameEvent> = Vec::new();
        open_origin(&mut grid, 4);

        let opened = open_zero_region(&mut grid, 4, &mut events);

        assert_eq!(opened, 8);
        assert_eq!(grid.count_visible(Visibility::Open), 9);
        let mut coords: Vec<_> = events.iter().map(|event| event.coords()).collect();
        coords.sort_unstable();
        coords.dedup();
        assert_eq!(coords.len(), 8);
        assert!(!coords.contains(&(1, 1)));
    }

    #[test]
    fn numbered_border_stays_closed() {
        // . . . .
        // . . . .
        // 1 1 . .
        // M 1 . .
        let mut grid = CellGrid::from_mine_indices(4, &[12]);
        let mut events: Vec<GameEvent> = Vec::new();
        open_origin(&mut grid, 0);

        open_zero_region(&mut grid, 0, &mut events);

        for index in [8, 9, 13] {
            assert!(grid.has_visibility(index, Visibility::Closed), "cell {index}");
        }
        assert!(grid.has_visibility(12, Visibility::Closed));
        assert_eq!(grid.count_visible(Visibility::Open), 12);
        assert!(events.iter().all(|event| matches!(
            event,
            GameEvent::SaveStep { adjacent: 0, .. }
        )));
    }

    #[test]
    fn flagged_zero_cells_block_the_cascade() {
        let mut grid = CellGrid::from_mine_indices(3, &[]);
        grid.set_visibility(1, Visibility::Flagged);
        let mut events: Vec<GameEvent> = Vec::new();
        open_origin(&mut grid, 0);

        open_zero_region(&mut grid, 0, &mut events);

        assert!(grid.has_visibility(1, Visibility::Flagged));
        assert_eq!(events.len(), 7);
    }

    #[test]
    fn waves_follow_distance_from_origin() {
        let mut grid = CellGrid::from_mine_indices(5, &[]);
        let mut events: Vec<GameEvent> = Vec::new();
        open_origin(&mut grid, 0);

        open_zero_region(&mut grid, 0, &mut events);

        // first wave: the three neighbors of the corner
        let first: Vec<_> = events[..3].iter().map(|event| event.coords()).collect();
        assert_eq!(first, vec![(0, 1), (1, 0), (1, 1)]);
        assert_eq!(events.len(), 24);
        let distance = |(row, col): Coord2| row.max(col);
        let distances: Vec<_> = events.iter().map(|event| distance(event.coords())).collect();
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
