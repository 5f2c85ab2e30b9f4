use serde::{Deserialize, Serialize};

use crate::*;

/// Receiver of the engine's per-cell notifications, usually the UI layer.
///
/// Each callback is issued together with the state change that caused it.
/// Implementations must not call back into the engine from a callback.
pub trait GameEventSink {
    /// A closed safe cell was opened by the player or by a cascade.
    fn on_save_step(&mut self, row: Coord, col: Coord, adjacent: u8);

    /// The player opened a mine.
    fn on_mine_step(&mut self, row: Coord, col: Coord);

    fn on_show_flag(&mut self, row: Coord, col: Coord);

    /// Reveal the true content of a cell, either as a hint or at game end.
    fn on_show_help(&mut self, row: Coord, col: Coord, content: CellContent);

    /// Return the cell to its plain closed look.
    fn on_reset(&mut self, row: Coord, col: Coord);
}

impl<S: GameEventSink + ?Sized> GameEventSink for &mut S {
    fn on_save_step(&mut self, row: Coord, col: Coord, adjacent: u8) {
        (**self).on_save_step(row, col, adjacent);
    }

    fn on_mine_step(&mut self, row: Coord, col: Coord) {
        (**self).on_mine_step(row, col);
    }

    fn on_show_flag(&mut self, row: Coord, col: Coord) {
        (**self).on_show_flag(row, col);
    }

    fn on_show_help(&mut self, row: Coord, col: Coord, content: CellContent) {
        (**self).on_show_help(row, col, content);
    }

    fn on_reset(&mut self, row: Coord, col: Coord) {
        (**self).on_reset(row, col);
    }
}

/// One sink notification as a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SaveStep { row: Coord, col: Coord, adjacent: u8 },
    MineStep { row: Coord, col: Coord },
    ShowFlag { row: Coord, col: Coord },
    ShowHelp { row: Coord, col: Coord, content: CellContent },
    Reset { row: Coord, col: Coord },
}

impl GameEvent {
    pub const fn coords(self) -> Coord2 {
        use GameEvent::*;
        match self {
            SaveStep { row, col, .. }
            | MineStep { row, col }
            | ShowFlag { row, col }
            | ShowHelp { row, col, .. }
            | Reset { row, col } => (row, col),
        }
    }
}

/// Records every notification in order.
impl GameEventSink for Vec<GameEvent> {
    fn on_save_step(&mut self, row: Coord, col: Coord, adjacent: u8) {
        self.push(GameEvent::SaveStep { row, col, adjacent });
    }

    fn on_mine_step(&mut self, row: Coord, col: Coord) {
        self.push(GameEvent::MineStep { row, col });
    }

    fn on_show_flag(&mut self, row: Coord, col: Coord) {
        self.push(GameEvent::ShowFlag { row, col });
    }

    fn on_show_help(&mut self, row: Coord, col: Coord, content: CellContent) {
        self.push(GameEvent::ShowHelp { row, col, content });
    }

    fn on_reset(&mut self, row: Coord, col: Coord) {
        self.push(GameEvent::Reset { row, col });
    }
}
