use crate::*;

/// Game session: owns the board and reports every visible change to its sink.
///
/// The engine never ends a game on its own. Stepping on a mine opens it and
/// notifies the sink; the caller decides when to call [`GameEngine::finish_game`].
#[derive(Debug)]
pub struct GameEngine<S: GameEventSink> {
    config: GameConfig,
    grid: CellGrid,
    generator: RandomMinefieldGenerator,
    sink: S,
}

impl<S: GameEventSink> GameEngine<S> {
    /// Starts a game with mines placed by a default [`RandomMinefieldGenerator`].
    pub fn new(size: Coord, mines: CellCount, sink: S) -> Result<Self> {
        Self::with_generator(
            GameConfig::new(size, mines)?,
            RandomMinefieldGenerator::default(),
            sink,
        )
    }

    /// Starts a game whose mine placements are reproducible from `seed`.
    pub fn with_seed(config: GameConfig, seed: u64, sink: S) -> Result<Self> {
        Self::with_generator(config, RandomMinefieldGenerator::new(seed), sink)
    }

    /// Starts a game with mines at exactly the given cells.
    ///
    /// Later calls to [`GameEngine::new_game`] place mines randomly again.
    pub fn from_mines(size: Coord, mines: &[Coord2], sink: S) -> Result<Self> {
        GameConfig::new(size, 0)?;
        let mut indices = Vec::with_capacity(mines.len());
        for &(row, col) in mines {
            if row >= size || col >= size {
                return Err(GameError::IndexOutOfRange { row, col });
            }
            indices.push(usize::from(row) * usize::from(size) + usize::from(col));
        }

        let grid = CellGrid::from_mine_indices(size, &indices);
        let config = GameConfig::new(size, grid.mine_count())?;
        Ok(Self {
            config,
            grid,
            generator: RandomMinefieldGenerator::default(),
            sink,
        })
    }

    fn with_generator(
        config: GameConfig,
        mut generator: RandomMinefieldGenerator,
        sink: S,
    ) -> Result<Self> {
        config.validate()?;
        let grid = generator.generate(config);
        log::debug!(
            "New {0}x{0} game with {1} mines",
            config.size,
            config.mines
        );
        Ok(Self {
            config,
            grid,
            generator,
            sink,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord {
        self.config.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn cell(&self, row: Coord, col: Coord) -> Result<Cell> {
        let index = self.validate_coords(row, col)?;
        Ok(self.grid.get(index))
    }

    pub fn opened_count(&self) -> CellCount {
        self.grid.count_visible(Visibility::Open)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.grid.count_visible(Visibility::Flagged)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Replaces the board with a freshly mined one of the same size and mine
    /// count, resetting every cell on the sink.
    pub fn new_game(&mut self) {
        self.grid = self.generator.generate(self.config);
        log::debug!("Started new game");

        for index in 0..self.grid.len() {
            let (row, col) = self.grid.coords_of(index);
            self.sink.on_reset(row, col);
        }
    }

    /// Opens a closed cell. Open and flagged cells are left untouched.
    pub fn step(&mut self, row: Coord, col: Coord) -> Result<StepOutcome> {
        let index = self.validate_coords(row, col)?;
        let cell = self.grid.get(index);
        if !cell.is(Visibility::Closed) {
            return Ok(StepOutcome::NoChange);
        }

        Ok(match cell.content() {
            CellContent::Mine => {
                self.sink.on_mine_step(row, col);
                self.grid.set_visibility(index, Visibility::Open);
                log::debug!("Stepped on mine at ({row}, {col})");
                StepOutcome::HitMine
            }
            CellContent::Adjacent(count) => {
                self.sink.on_save_step(row, col, count);
                self.grid.set_visibility(index, Visibility::Open);
                if count == 0 {
                    cascade::open_zero_region(&mut self.grid, index, &mut self.sink);
                }
                StepOutcome::Revealed
            }
        })
    }

    /// Toggles the flag on a closed or flagged cell. Open cells are left untouched.
    pub fn flag(&mut self, row: Coord, col: Coord) -> Result<MarkOutcome> {
        let index = self.validate_coords(row, col)?;

        Ok(match self.grid.get(index).visibility() {
            Visibility::Flagged => {
                self.grid.set_visibility(index, Visibility::Closed);
                self.sink.on_reset(row, col);
                MarkOutcome::Unflagged
            }
            Visibility::Closed => {
                self.grid.set_visibility(index, Visibility::Flagged);
                self.sink.on_show_flag(row, col);
                MarkOutcome::Flagged
            }
            Visibility::Open => MarkOutcome::NoChange,
        })
    }

    /// Shows the true content of every unopened cell, or restores their normal
    /// look when `enabled` is false. Never changes the board.
    pub fn show_cheat(&mut self, enabled: bool) {
        for index in 0..self.grid.len() {
            let cell = self.grid.get(index);
            let (row, col) = self.grid.coords_of(index);
            match cell.visibility() {
                Visibility::Open => {}
                _ if enabled => self.sink.on_show_help(row, col, cell.content()),
                Visibility::Closed => self.sink.on_reset(row, col),
                Visibility::Flagged => self.sink.on_show_flag(row, col),
            }
        }
    }

    /// Opens every remaining cell and reports whether the game was won.
    ///
    /// The game counts as won only when the number of cells still unopened,
    /// flagged ones included, equals the mine count. A flag left on a safe
    /// cell therefore loses the game.
    pub fn finish_game(&mut self) -> bool {
        let mut not_opened: CellCount = 0;
        for index in 0..self.grid.len() {
            let cell = self.grid.get(index);
            if cell.is(Visibility::Open) {
                continue;
            }
            let (row, col) = self.grid.coords_of(index);
            self.sink.on_show_help(row, col, cell.content());
            self.grid.set_visibility(index, Visibility::Open);
            not_opened += 1;
        }

        let won = not_opened == self.config.mines;
        log::debug!(
            "Game finished, {not_opened} cells left unopened, {}",
            if won { "won" } else { "lost" }
        );
        won
    }

    pub fn save_instance(&self) -> Snapshot {
        self.grid.snapshot()
    }

    /// Replaces the board with a saved one and replays its visible state.
    ///
    /// The snapshot is fully decoded before the board is touched, so on error
    /// the current game is left as it was.
    pub fn restore_instance(&mut self, snapshot: &Snapshot) -> Result<()> {
        let grid = CellGrid::from_snapshot(self.config.size, snapshot)?;
        let restored_mines = grid.mine_count();
        if restored_mines != self.config.mines {
            log::warn!(
                "Restored board has {restored_mines} mines, expected {}",
                self.config.mines
            );
        }
        self.grid = grid;
        log::debug!("Restored game from {} cells", snapshot.len());

        for index in 0..self.grid.len() {
            let cell = self.grid.get(index);
            let (row, col) = self.grid.coords_of(index);
            match cell.visibility() {
                Visibility::Open => self.sink.on_show_help(row, col, cell.content()),
                Visibility::Flagged => self.sink.on_show_flag(row, col),
                Visibility::Closed => {}
            }
        }
        Ok(())
    }

    fn validate_coords(&self, row: Coord, col: Coord) -> Result<usize> {
        if self.grid.contains((row, col)) {
            Ok(self.grid.index_of((row, col)))
        } else {
            Err(GameError::IndexOutOfRange { row, col })
        }
    }
}
