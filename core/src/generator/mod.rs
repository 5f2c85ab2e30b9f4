use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    /// Produces a freshly mined board with every adjacent count filled in.
    fn generate(&mut self, config: GameConfig) -> CellGrid;
}
